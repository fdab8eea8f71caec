use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the content backend, without a trailing slash.
    pub api_base_url: String,
    pub port: u16,
    pub request_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_base_url = env::var("SITE_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        let request_timeout = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        Self {
            api_base_url,
            port,
            request_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = AppConfig {
            api_base_url: "http://localhost:3000/api/"
                .trim_end_matches('/')
                .to_string(),
            port: 8080,
            request_timeout: Duration::from_secs(30),
        };
        assert_eq!(config.api_base_url, "http://localhost:3000/api");
    }
}
