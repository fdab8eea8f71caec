use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const ROLE_SUPER_ADMIN: &str = "SUPER_ADMIN";
pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_EDITOR: &str = "EDITOR";

pub const ROLES: [&str; 3] = [ROLE_SUPER_ADMIN, ROLE_ADMIN, ROLE_EDITOR];

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeroSection {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub stat1_value: i64,
    pub stat1_label: String,
    pub stat2_value: i64,
    pub stat2_label: String,
    pub stat3_value: i64,
    pub stat3_label: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroInput {
    pub title: String,
    pub subtitle: String,
    pub primary_cta: String,
    pub secondary_cta: String,
    pub stat1_value: i64,
    pub stat1_label: String,
    pub stat2_value: i64,
    pub stat2_label: String,
    pub stat3_value: i64,
    pub stat3_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeroSlide {
    pub id: i64,
    pub image_url: String,
    pub caption: Option<String>,
    pub order: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideInput {
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub order: i64,
    pub is_active: bool,
}

/// Shared shape for the two ordered title/description collections
/// (process steps and "why choose us" items).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderedStep {
    pub id: i64,
    pub order: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepInput {
    pub order: i64,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteSettings {
    pub id: i64,
    pub site_name: String,
    pub site_description: Option<String>,
    pub footer_text: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub company_address: Option<String>,
    pub social_facebook: Option<String>,
    pub social_linkedin: Option<String>,
    pub social_twitter: Option<String>,
    pub logo_url: Option<String>,
    pub navbar_bg_color: Option<String>,
    pub navbar_text_color: Option<String>,
    #[serde(default = "default_true")]
    pub preloader_enabled: bool,
    pub preloader_text: Option<String>,
    pub preloader_duration: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsInput {
    pub site_name: String,
    pub site_description: String,
    pub footer_text: String,
    pub company_email: String,
    pub company_phone: String,
    pub company_address: String,
    pub social_facebook: String,
    pub social_linkedin: String,
    pub social_twitter: String,
    pub logo_url: String,
    pub navbar_bg_color: String,
    pub navbar_text_color: String,
    pub preloader_enabled: bool,
    pub preloader_text: String,
    pub preloader_duration: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceOffering {
    pub id: i64,
    pub title: String,
    pub summary: String,
    pub description: String,
    pub icon_key: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    pub title: String,
    pub summary: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Project {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<String>,
    pub live_url: Option<String>,
    pub repo_url: Option<String>,
    #[serde(default)]
    pub display_order: i64,
    pub published_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Tags arrive as one comma-separated string.
    pub fn tag_list(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Testimonial {
    pub id: i64,
    pub client_name: String,
    pub client_title: Option<String>,
    pub message: String,
    pub rating: i64,
    pub avatar_url: Option<String>,
    pub company: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialInput {
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub message: String,
    pub rating: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub website_url: Option<String>,
    pub order: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerInput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
    pub order: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Page {
    pub id: i64,
    pub title: String,
    /// Unique; the lookup key for public routing (`/page/{slug}`).
    pub slug: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInput {
    pub title: String,
    pub slug: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NavbarMenuItem {
    pub id: i64,
    pub label: String,
    pub path: String,
    pub order: i64,
    #[serde(default)]
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    pub label: String,
    pub path: String,
    pub order: i64,
    pub open_in_new_tab: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: Option<String>,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreateInput {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateInput {
    pub email: String,
    pub full_name: String,
    pub role: String,
    /// Write-only; omitted entirely when left blank in the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub designation: String,
    pub category: String,
    pub image_url: Option<String>,
    pub email: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub facebook: Option<String>,
    pub instagram: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberInput {
    pub name: String,
    pub designation: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub display_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ThemeSettings {
    pub id: i64,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub surface_color: String,
    pub neutral_color: String,
    pub dark_mode: bool,
    pub updated_by: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInput {
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub surface_color: String,
    pub neutral_color: String,
    pub dark_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}
