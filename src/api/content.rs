use super::{ApiClient, ApiError};
use crate::models::{
    Project, ProjectInput, ServiceInput, ServiceOffering, TeamMember, TeamMemberInput,
    Testimonial, TestimonialInput,
};

impl ApiClient {
    pub async fn fetch_services(&self) -> Result<Vec<ServiceOffering>, ApiError> {
        self.get_json("/services", "services").await
    }

    pub async fn create_service(
        &self,
        input: &ServiceInput,
    ) -> Result<ServiceOffering, ApiError> {
        self.post_json("/services", "service", input).await
    }

    pub async fn update_service(
        &self,
        id: i64,
        input: &ServiceInput,
    ) -> Result<ServiceOffering, ApiError> {
        self.put_json(&format!("/services/{id}"), "service", input).await
    }

    pub async fn delete_service(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/services/{id}"), "service").await
    }

    pub async fn fetch_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_json("/projects", "projects").await
    }

    pub async fn fetch_project_by_slug(&self, slug: &str) -> Result<Project, ApiError> {
        self.get_json(&format!("/projects/slug/{slug}"), "project").await
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<Project, ApiError> {
        self.post_json("/projects", "project", input).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        input: &ProjectInput,
    ) -> Result<Project, ApiError> {
        self.put_json(&format!("/projects/{id}"), "project", input).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{id}"), "project").await
    }

    pub async fn fetch_testimonials(&self) -> Result<Vec<Testimonial>, ApiError> {
        self.get_json("/testimonials", "testimonials").await
    }

    pub async fn create_testimonial(
        &self,
        input: &TestimonialInput,
    ) -> Result<Testimonial, ApiError> {
        self.post_json("/testimonials", "testimonial", input).await
    }

    pub async fn update_testimonial(
        &self,
        id: i64,
        input: &TestimonialInput,
    ) -> Result<Testimonial, ApiError> {
        self.put_json(&format!("/testimonials/{id}"), "testimonial", input)
            .await
    }

    pub async fn delete_testimonial(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/testimonials/{id}"), "testimonial").await
    }

    pub async fn fetch_team(&self) -> Result<Vec<TeamMember>, ApiError> {
        self.get_json("/team", "team members").await
    }

    pub async fn fetch_team_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<TeamMember>, ApiError> {
        self.get_json(&format!("/team/category/{category}"), "team members")
            .await
    }

    pub async fn fetch_team_categories(&self) -> Result<Vec<String>, ApiError> {
        self.get_json("/team/categories", "team categories").await
    }

    pub async fn create_team_member(
        &self,
        input: &TeamMemberInput,
    ) -> Result<TeamMember, ApiError> {
        self.post_json("/team", "team member", input).await
    }

    pub async fn update_team_member(
        &self,
        id: i64,
        input: &TeamMemberInput,
    ) -> Result<TeamMember, ApiError> {
        self.put_json(&format!("/team/{id}"), "team member", input).await
    }

    pub async fn delete_team_member(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/team/{id}"), "team member").await
    }
}
