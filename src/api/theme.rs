use super::{ApiClient, ApiError};
use crate::models::{ThemeInput, ThemeSettings};

impl ApiClient {
    pub async fn fetch_theme(&self) -> Result<ThemeSettings, ApiError> {
        self.get_json("/theme", "theme").await
    }

    pub async fn update_theme(&self, input: &ThemeInput) -> Result<ThemeSettings, ApiError> {
        self.patch_json("/theme", "theme", input).await
    }
}
