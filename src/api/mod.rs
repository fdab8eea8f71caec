mod auth;
mod cms;
mod content;
mod error;
mod theme;

pub use error::ApiError;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AppConfig;

const FETCH: &str = "fetch";
const CREATE: &str = "create";
const UPDATE: &str = "update";
const DELETE: &str = "delete";
const SEED: &str = "seed";

/// Typed client for the content backend. One function pair per REST
/// resource; reads are unauthenticated. The client constructed at startup
/// carries no token; a handler that mutates obtains a per-request clone
/// through [`ApiClient::with_token`], so no token is ever shared across
/// requests.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_base_url.clone(),
            token: None,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A clone of this client whose writes authenticate as `token`. The
    /// underlying connection pool is shared; the token is not.
    pub fn with_token(&self, token: &str) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.to_string()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn expect_ok(
        builder: RequestBuilder,
        action: &'static str,
        resource: &'static str,
    ) -> Result<reqwest::Response, ApiError> {
        let response = builder
            .send()
            .await
            .map_err(|source| ApiError::Network {
                action,
                resource,
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                action,
                resource,
                status,
            });
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        resource: &'static str,
    ) -> Result<T, ApiError> {
        response
            .json()
            .await
            .map_err(|source| ApiError::Decode { resource, source })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<T, ApiError> {
        let response =
            Self::expect_ok(self.http.get(self.url(path)), FETCH, resource).await?;
        Self::decode(response, resource).await
    }

    /// Authenticated read; only a handful of resources (users, profile)
    /// require the token on GET.
    pub(crate) async fn get_json_authed<T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<T, ApiError> {
        let builder = self.bearer(self.http.get(self.url(path)));
        let response = Self::expect_ok(builder, FETCH, resource).await?;
        Self::decode(response, resource).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.write_json(Method::POST, path, CREATE, resource, body)
            .await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.write_json(Method::PUT, path, UPDATE, resource, body)
            .await
    }

    pub(crate) async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        resource: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.write_json(Method::PATCH, path, UPDATE, resource, body)
            .await
    }

    async fn write_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        action: &'static str,
        resource: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        let builder = self
            .bearer(self.http.request(method, self.url(path)))
            .json(body);
        let response = Self::expect_ok(builder, action, resource).await?;
        Self::decode(response, resource).await
    }

    pub(crate) async fn delete(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<(), ApiError> {
        let builder = self.bearer(self.http.delete(self.url(path)));
        Self::expect_ok(builder, DELETE, resource).await?;
        Ok(())
    }

    /// Fire a backend seed endpoint; the response body is ignored.
    pub(crate) async fn post_seed(
        &self,
        path: &str,
        resource: &'static str,
    ) -> Result<(), ApiError> {
        let builder = self.bearer(self.http.post(self.url(path)));
        Self::expect_ok(builder, SEED, resource).await?;
        Ok(())
    }
}
