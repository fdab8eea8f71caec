use actix_web::cookie::{Cookie, SameSite};
use actix_web::HttpRequest;

use crate::models::SiteSettings;

/// Session cookie marking that the intro preloader already ran.
pub const SEEN_COOKIE: &str = "msf_seen_intro";

pub const DEFAULT_TEXT: &str = "Metasoft Info";
pub const DEFAULT_DURATION_MS: i64 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloaderView {
    pub text: String,
    pub duration_ms: i64,
}

/// Decide whether the loading view runs for this request. Only an initial
/// load of the root path qualifies, and only while site settings keep the
/// preloader enabled; once seen, it stays gone for the rest of the
/// browser session.
pub fn gate(settings: Option<&SiteSettings>, path: &str, seen: bool) -> Option<PreloaderView> {
    if path != "/" || seen {
        return None;
    }
    let enabled = settings.map(|s| s.preloader_enabled).unwrap_or(true);
    if !enabled {
        return None;
    }
    Some(PreloaderView {
        text: settings
            .and_then(|s| s.preloader_text.clone())
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TEXT.to_string()),
        duration_ms: settings
            .and_then(|s| s.preloader_duration)
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_DURATION_MS),
    })
}

pub fn has_seen(req: &HttpRequest) -> bool {
    req.cookie(SEEN_COOKIE).is_some()
}

/// Session-scoped (no max-age) so a new browser session triggers the
/// preloader again.
pub fn seen_cookie(req: &HttpRequest) -> Cookie<'static> {
    let mut builder = Cookie::build(SEEN_COOKIE, "1")
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    if req.connection_info().scheme() == "https" {
        builder = builder.secure(true);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(enabled: bool) -> SiteSettings {
        SiteSettings {
            id: 1,
            site_name: "Metasoft Info".to_string(),
            site_description: None,
            footer_text: None,
            company_email: None,
            company_phone: None,
            company_address: None,
            social_facebook: None,
            social_linkedin: None,
            social_twitter: None,
            logo_url: None,
            navbar_bg_color: None,
            navbar_text_color: None,
            preloader_enabled: enabled,
            preloader_text: Some("Loading".to_string()),
            preloader_duration: Some(1500),
        }
    }

    #[test]
    fn disabled_settings_never_show_the_loader() {
        assert_eq!(gate(Some(&settings(false)), "/", false), None);
    }

    #[test]
    fn only_the_root_path_qualifies() {
        assert!(gate(Some(&settings(true)), "/", false).is_some());
        assert_eq!(gate(Some(&settings(true)), "/services", false), None);
    }

    #[test]
    fn seen_sessions_skip_it() {
        assert_eq!(gate(Some(&settings(true)), "/", true), None);
    }

    #[test]
    fn missing_settings_fall_back_to_defaults() {
        let view = gate(None, "/", false).expect("defaults to enabled");
        assert_eq!(view.text, DEFAULT_TEXT);
        assert_eq!(view.duration_ms, DEFAULT_DURATION_MS);
    }

    #[test]
    fn configured_text_and_duration_flow_through() {
        let view = gate(Some(&settings(true)), "/", false).expect("enabled");
        assert_eq!(view.text, "Loading");
        assert_eq!(view.duration_ms, 1500);
    }
}
