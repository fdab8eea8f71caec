use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::{AuthResponse, User};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a bearer token. The caller decides whether
    /// to keep the token; this call itself is unauthenticated.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        self.post_json("/auth/login", "session", &LoginRequest { email, password })
            .await
    }

    /// Profile for this client's token. Fails closed: an error here is
    /// treated by callers as "not authenticated".
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json_authed("/auth/me", "profile").await
    }
}
