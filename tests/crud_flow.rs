use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use metasoft_site::cache::CacheKey;
use metasoft_site::config::AppConfig;
use metasoft_site::state::AppState;

fn state_for(server: &MockServer) -> AppState {
    let config = AppConfig {
        api_base_url: server.uri(),
        port: 0,
        request_timeout: Duration::from_secs(5),
    };
    AppState::new(config).expect("state")
}

fn service_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "summary": format!("{title} summary"),
        "description": format!("{title} description")
    })
}

fn testimonial_json(id: i64, client: &str) -> serde_json::Value {
    json!({
        "id": id,
        "clientName": client,
        "message": "Great work",
        "rating": 5
    })
}

#[tokio::test]
async fn create_then_invalidate_grows_the_list_by_one() {
    let server = MockServer::start().await;
    // First read sees two services; the refetch after invalidation sees three.
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            service_json(1, "Web development"),
            service_json(2, "Cloud consulting"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            service_json(1, "Web development"),
            service_json(2, "Cloud consulting"),
            service_json(3, "SEO audit"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(201).set_body_json(service_json(3, "SEO audit")))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let api = state.api.with_token("secret-token");

    let before = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;
    assert_eq!(before.len(), 2);

    let input = metasoft_site::models::ServiceInput {
        title: "SEO audit".to_string(),
        summary: "SEO audit summary".to_string(),
        description: "SEO audit description".to_string(),
    };
    api.create_service(&input).await.expect("create");
    state.cache.invalidate(CacheKey::Services).await;

    let after = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;
    assert_eq!(after.len(), before.len() + 1);
    assert!(after.iter().any(|s| s.title == "SEO audit"));
}

#[tokio::test]
async fn delete_then_invalidate_shrinks_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/testimonials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            testimonial_json(1, "Acme"),
            testimonial_json(2, "Globex"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/testimonials"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([testimonial_json(1, "Acme")])),
        )
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/testimonials/2"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let api = state.api.with_token("secret-token");

    let before = state
        .cached_list(CacheKey::Testimonials, state.api.fetch_testimonials())
        .await;
    assert_eq!(before.len(), 2);

    api.delete_testimonial(2).await.expect("delete");
    state.cache.invalidate(CacheKey::Testimonials).await;

    let after = state
        .cached_list(CacheKey::Testimonials, state.api.fetch_testimonials())
        .await;
    assert_eq!(after.len(), before.len() - 1);
    assert!(after.iter().all(|t| t.id != 2));
}

#[tokio::test]
async fn updating_one_record_leaves_the_rest_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            service_json(1, "Web development"),
            service_json(2, "Cloud consulting"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            service_json(1, "Web platforms"),
            service_json(2, "Cloud consulting"),
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/services/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(service_json(1, "Web platforms")))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let api = state.api.with_token("secret-token");

    let before = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;

    let input = metasoft_site::models::ServiceInput {
        title: "Web platforms".to_string(),
        summary: "Web platforms summary".to_string(),
        description: "Web platforms description".to_string(),
    };
    api.update_service(1, &input).await.expect("update");
    state.cache.invalidate(CacheKey::Services).await;

    let after = state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;

    let changed = after.iter().find(|s| s.id == 1).expect("target kept");
    assert_eq!(changed.title, "Web platforms");
    let untouched_before = before.iter().find(|s| s.id == 2).expect("other before");
    let untouched_after = after.iter().find(|s| s.id == 2).expect("other after");
    assert_eq!(untouched_before.title, untouched_after.title);
    assert_eq!(untouched_before.summary, untouched_after.summary);
}

#[tokio::test]
async fn cached_reads_skip_the_network_until_invalidated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 1,
            "title": "Intranet revamp",
            "slug": "intranet-revamp",
            "summary": "A revamp"
        }])))
        .expect(2)
        .mount(&server)
        .await;

    let state = state_for(&server);

    // Miss, then hit, then a forced miss after invalidation.
    state
        .cached_list(CacheKey::Projects, state.api.fetch_projects())
        .await;
    state
        .cached_list(CacheKey::Projects, state.api.fetch_projects())
        .await;
    state.cache.invalidate(CacheKey::Projects).await;
    let list = state
        .cached_list(CacheKey::Projects, state.api.fetch_projects())
        .await;
    assert_eq!(list.len(), 1);
}

#[tokio::test]
async fn read_failure_degrades_to_an_empty_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/partners"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let state = state_for(&server);
    let partners = state
        .cached_list(CacheKey::Partners, state.api.fetch_partners())
        .await;
    assert!(partners.is_empty());
}

#[tokio::test]
async fn login_caches_the_profile_behind_the_issued_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accessToken": "issued-token",
            "user": {
                "id": 7,
                "email": "admin@metasoft.example",
                "fullName": "Site Admin",
                "role": "ADMIN"
            }
        })))
        .mount(&server)
        .await;
    // Resolving the freshly issued token must not need /auth/me at all.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let (token, user) = state
        .session
        .login("admin@metasoft.example", "hunter2")
        .await
        .expect("login");

    assert_eq!(token, "issued-token");
    assert_eq!(user.display_name, "Site Admin");

    let resolved = state.session.resolve("issued-token").await.expect("cached");
    assert_eq!(resolved.id, 7);
}

#[tokio::test]
async fn profile_resolution_is_cached_per_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "email": "admin@metasoft.example",
            "fullName": null,
            "role": "EDITOR"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server);
    let first = state.session.resolve("some-token").await.expect("profile");
    let second = state.session.resolve("some-token").await.expect("cached");

    // Missing full name falls back to the email for display.
    assert_eq!(first.display_name, "admin@metasoft.example");
    assert_eq!(second.id, 7);
}

#[tokio::test]
async fn failed_profile_resolution_reads_as_unauthenticated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let state = state_for(&server);
    assert!(state.session.resolve("stale-token").await.is_none());
}

#[tokio::test]
async fn logout_drops_the_profile_and_every_cached_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            service_json(1, "Web development"),
        ])))
        .mount(&server)
        .await;
    // One lookup before logout, one after; the cached entry covers the rest.
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "email": "admin@metasoft.example",
            "fullName": "Site Admin",
            "role": "ADMIN"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let state = state_for(&server);
    state.session.resolve("secret-token").await.expect("profile");
    state.session.resolve("secret-token").await.expect("cached");
    state
        .cached_list(CacheKey::Services, state.api.fetch_services())
        .await;

    state.session.logout("secret-token").await;

    assert!(state
        .cache
        .get::<Vec<metasoft_site::models::ServiceOffering>>(CacheKey::Services)
        .await
        .is_none());
    // The dropped profile forces a fresh /auth/me round-trip.
    state.session.resolve("secret-token").await.expect("re-resolved");
}
