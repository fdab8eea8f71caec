use std::time::Duration;

use actix_web::cookie::Cookie;
use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use metasoft_site::config::AppConfig;
use metasoft_site::preloader::SEEN_COOKIE;
use metasoft_site::routes;
use metasoft_site::session::TOKEN_COOKIE;
use metasoft_site::state::AppState;

fn state_for(server: &MockServer) -> AppState {
    let config = AppConfig {
        api_base_url: server.uri(),
        port: 0,
        request_timeout: Duration::from_secs(5),
    };
    AppState::new(config).expect("state")
}

macro_rules! service {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(routes::public::configure)
                .configure(routes::admin::configure)
                .configure(routes::events::configure),
        )
        .await
    };
}

fn settings_json(preloader_enabled: bool) -> serde_json::Value {
    json!({
        "id": 1,
        "siteName": "Metasoft Info",
        "preloaderEnabled": preloader_enabled,
        "preloaderText": "Metasoft Info",
        "preloaderDuration": 1500
    })
}

async fn mount_settings(server: &MockServer, preloader_enabled: bool) {
    Mock::given(method("GET"))
        .and(path("/site-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(settings_json(preloader_enabled)))
        .mount(server)
        .await;
}

#[actix_web::test]
async fn health_responds_ok() {
    let server = MockServer::start().await;
    let app = service!(state_for(&server));

    let res = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn admin_without_a_session_redirects_to_login() {
    let server = MockServer::start().await;
    let app = service!(state_for(&server));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/admin/dashboard").to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok());
    assert_eq!(location, Some("/login"));
}

#[actix_web::test]
async fn admin_with_a_stale_token_redirects_to_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    let app = service!(state_for(&server));

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/admin/services")
            .cookie(Cookie::new(TOKEN_COOKIE, "stale"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
}

#[actix_web::test]
async fn disabled_preloader_renders_the_main_layout_immediately() {
    let server = MockServer::start().await;
    mount_settings(&server, false).await;
    let app = service!(state_for(&server));

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/").to_request()).await;
    let html = std::str::from_utf8(&body).expect("utf8 body");

    assert!(!html.contains("id=\"preloader\""));
    assert!(html.contains("<main>"));
}

#[actix_web::test]
async fn enabled_preloader_shows_the_loading_view_once() {
    let server = MockServer::start().await;
    mount_settings(&server, true).await;
    let app = service!(state_for(&server));

    let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let marked_seen = res
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|v| v.starts_with(SEEN_COOKIE)));
    assert!(marked_seen);
    let body = test::read_body(res).await;
    assert!(std::str::from_utf8(&body)
        .expect("utf8 body")
        .contains("id=\"preloader\""));

    // A session that already saw the intro goes straight to the layout.
    let body = test::call_and_read_body(
        &app,
        test::TestRequest::get()
            .uri("/")
            .cookie(Cookie::new(SEEN_COOKIE, "1"))
            .to_request(),
    )
    .await;
    assert!(!std::str::from_utf8(&body)
        .expect("utf8 body")
        .contains("id=\"preloader\""));
}

#[actix_web::test]
async fn logout_is_not_reachable_anonymously() {
    let server = MockServer::start().await;
    let app = service!(state_for(&server));

    // No unauthenticated GET surface wipes session or cache state.
    let res = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The admin guard turns an unauthenticated sign-out away.
    let res = test::call_service(
        &app,
        test::TestRequest::post().uri("/admin/logout").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    let location = res
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok());
    assert_eq!(location, Some("/login"));
}

#[actix_web::test]
async fn unknown_page_slug_renders_not_found() {
    let server = MockServer::start().await;
    let app = service!(state_for(&server));

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/page/no-such-page").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
