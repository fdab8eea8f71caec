use std::collections::HashMap;
use std::sync::Arc;

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header,
    middleware::Next,
    web, Error, HttpMessage, HttpRequest, HttpResponse,
};
use tokio::sync::RwLock;

use crate::{api::ApiClient, api::ApiError, cache::ContentCache, models::User, state::AppState};

/// Fixed cookie key carrying the backend bearer token.
pub const TOKEN_COOKIE: &str = "msf_token";

#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: String,
}

impl AuthUser {
    fn from_profile(user: &User) -> Self {
        let display_name = user
            .full_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| user.email.clone());
        Self {
            id: user.id,
            email: user.email.clone(),
            display_name,
            role: user.role.clone(),
        }
    }
}

/// Session context constructed once at startup and injected through
/// `AppState`. Holds the profile cache; the token itself travels in the
/// `msf_token` cookie and never leaves the request that carried it: each
/// resolution authenticates with a per-request client clone.
pub struct Session {
    api: ApiClient,
    cache: Arc<ContentCache>,
    profiles: RwLock<HashMap<String, AuthUser>>,
}

impl Session {
    pub fn new(api: ApiClient, cache: Arc<ContentCache>) -> Self {
        Self {
            api,
            cache,
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Exchange credentials for a token and resolve the profile behind it.
    pub async fn login(&self, email: &str, password: &str) -> Result<(String, AuthUser), ApiError> {
        let auth = self.api.login(email, password).await?;
        let user = AuthUser::from_profile(&auth.user);
        self.profiles
            .write()
            .await
            .insert(auth.access_token.clone(), user.clone());
        Ok((auth.access_token, user))
    }

    /// Resolve a request token to a profile. The first sighting of a token
    /// costs one `/auth/me` round-trip; failures are not retried and read
    /// as unauthenticated.
    pub async fn resolve(&self, token: &str) -> Option<AuthUser> {
        if let Some(user) = self.profiles.read().await.get(token) {
            return Some(user.clone());
        }
        match self.api.with_token(token).me().await {
            Ok(profile) => {
                let user = AuthUser::from_profile(&profile);
                self.profiles
                    .write()
                    .await
                    .insert(token.to_string(), user.clone());
                Some(user)
            }
            Err(err) => {
                log::warn!("profile lookup failed: {err}");
                None
            }
        }
    }

    /// Drop this token's cached profile and every cached content key.
    pub async fn logout(&self, token: &str) {
        self.profiles.write().await.remove(token);
        self.cache.clear().await;
    }
}

pub fn request_token(req: &HttpRequest) -> Option<String> {
    req.cookie(TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

pub fn token_cookie(req: &HttpRequest, token: &str) -> Cookie<'static> {
    let mut builder = Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(7));
    if req.connection_info().scheme() == "https" {
        builder = builder.secure(true);
    }
    builder.finish()
}

pub fn clear_token_cookie(req: &HttpRequest) -> Cookie<'static> {
    let mut builder = Cookie::build(TOKEN_COOKIE, "")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::seconds(0));
    if req.connection_info().scheme() == "https" {
        builder = builder.secure(true);
    }
    builder.finish()
}

/// Guard for the `/admin` scope: resolves the cookie token to a profile
/// and inserts the `AuthUser` plus an [`ApiClient`] authenticated as that
/// token into request extensions, or redirects to the login page.
pub async fn admin_guard<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: actix_web::body::MessageBody + 'static,
{
    let authed = match req.app_data::<web::Data<AppState>>() {
        Some(state) => match req.cookie(TOKEN_COOKIE) {
            Some(cookie) => state
                .session
                .resolve(cookie.value())
                .await
                .map(|user| (user, state.api.with_token(cookie.value()))),
            None => None,
        },
        None => None,
    };

    match authed {
        Some((user, api)) => {
            req.extensions_mut().insert(user);
            req.extensions_mut().insert(api);
            let res = next.call(req).await?;
            Ok(res.map_into_boxed_body())
        }
        None => {
            let response = HttpResponse::SeeOther()
                .append_header((header::LOCATION, "/login"))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish();
            Ok(req.into_response(response))
        }
    }
}
