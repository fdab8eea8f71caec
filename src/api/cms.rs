use super::{ApiClient, ApiError};
use crate::models::{
    HeroInput, HeroSection, HeroSlide, MenuItemInput, NavbarMenuItem, OrderedStep, Page,
    PageInput, Partner, PartnerInput, SiteSettings, SiteSettingsInput, SlideInput, StepInput,
    User, UserCreateInput, UserUpdateInput,
};

impl ApiClient {
    pub async fn fetch_hero(&self) -> Result<HeroSection, ApiError> {
        self.get_json("/hero", "hero section").await
    }

    pub async fn update_hero(&self, input: &HeroInput) -> Result<HeroSection, ApiError> {
        self.put_json("/hero", "hero section", input).await
    }

    pub async fn fetch_hero_slides(&self) -> Result<Vec<HeroSlide>, ApiError> {
        self.get_json("/hero-slides", "hero slides").await
    }

    pub async fn create_hero_slide(&self, input: &SlideInput) -> Result<HeroSlide, ApiError> {
        self.post_json("/hero-slides", "hero slide", input).await
    }

    pub async fn update_hero_slide(
        &self,
        id: i64,
        input: &SlideInput,
    ) -> Result<HeroSlide, ApiError> {
        self.put_json(&format!("/hero-slides/{id}"), "hero slide", input)
            .await
    }

    pub async fn delete_hero_slide(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/hero-slides/{id}"), "hero slide").await
    }

    pub async fn fetch_process_steps(&self) -> Result<Vec<OrderedStep>, ApiError> {
        self.get_json("/process", "process steps").await
    }

    pub async fn create_process_step(&self, input: &StepInput) -> Result<OrderedStep, ApiError> {
        self.post_json("/process", "process step", input).await
    }

    pub async fn update_process_step(
        &self,
        id: i64,
        input: &StepInput,
    ) -> Result<OrderedStep, ApiError> {
        self.put_json(&format!("/process/{id}"), "process step", input)
            .await
    }

    pub async fn delete_process_step(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/process/{id}"), "process step").await
    }

    pub async fn fetch_why_choose_us(&self) -> Result<Vec<OrderedStep>, ApiError> {
        self.get_json("/why-choose-us", "why choose us items").await
    }

    pub async fn create_why_choose_us(
        &self,
        input: &StepInput,
    ) -> Result<OrderedStep, ApiError> {
        self.post_json("/why-choose-us", "why choose us item", input)
            .await
    }

    pub async fn update_why_choose_us(
        &self,
        id: i64,
        input: &StepInput,
    ) -> Result<OrderedStep, ApiError> {
        self.put_json(&format!("/why-choose-us/{id}"), "why choose us item", input)
            .await
    }

    pub async fn delete_why_choose_us(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/why-choose-us/{id}"), "why choose us item")
            .await
    }

    pub async fn fetch_site_settings(&self) -> Result<SiteSettings, ApiError> {
        self.get_json("/site-settings", "site settings").await
    }

    pub async fn update_site_settings(
        &self,
        input: &SiteSettingsInput,
    ) -> Result<SiteSettings, ApiError> {
        self.put_json("/site-settings", "site settings", input).await
    }

    pub async fn fetch_partners(&self) -> Result<Vec<Partner>, ApiError> {
        self.get_json("/partners", "partners").await
    }

    pub async fn create_partner(&self, input: &PartnerInput) -> Result<Partner, ApiError> {
        self.post_json("/partners", "partner", input).await
    }

    pub async fn update_partner(
        &self,
        id: i64,
        input: &PartnerInput,
    ) -> Result<Partner, ApiError> {
        self.put_json(&format!("/partners/{id}"), "partner", input).await
    }

    pub async fn delete_partner(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/partners/{id}"), "partner").await
    }

    pub async fn fetch_pages(&self) -> Result<Vec<Page>, ApiError> {
        self.get_json("/pages", "pages").await
    }

    pub async fn fetch_page_by_slug(&self, slug: &str) -> Result<Page, ApiError> {
        self.get_json(&format!("/pages/{slug}"), "page").await
    }

    pub async fn create_page(&self, input: &PageInput) -> Result<Page, ApiError> {
        self.post_json("/pages", "page", input).await
    }

    pub async fn update_page(&self, id: i64, input: &PageInput) -> Result<Page, ApiError> {
        self.put_json(&format!("/pages/{id}"), "page", input).await
    }

    pub async fn delete_page(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/pages/{id}"), "page").await
    }

    pub async fn seed_pages(&self) -> Result<(), ApiError> {
        self.post_seed("/pages/seed", "pages").await
    }

    pub async fn fetch_navbar_menu(&self) -> Result<Vec<NavbarMenuItem>, ApiError> {
        self.get_json("/navbar-menu", "navbar menu").await
    }

    pub async fn create_menu_item(
        &self,
        input: &MenuItemInput,
    ) -> Result<NavbarMenuItem, ApiError> {
        self.post_json("/navbar-menu", "menu item", input).await
    }

    pub async fn delete_menu_item(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/navbar-menu/{id}"), "menu item").await
    }

    pub async fn seed_navbar_menu(&self) -> Result<(), ApiError> {
        self.post_seed("/navbar-menu/seed", "navbar menu").await
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json_authed("/users", "users").await
    }

    pub async fn create_user(&self, input: &UserCreateInput) -> Result<User, ApiError> {
        self.post_json("/users", "user", input).await
    }

    pub async fn update_user(&self, id: i64, input: &UserUpdateInput) -> Result<User, ApiError> {
        self.patch_json(&format!("/users/{id}"), "user", input).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/users/{id}"), "user").await
    }
}
