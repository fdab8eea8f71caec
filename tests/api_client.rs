use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use metasoft_site::api::ApiClient;
use metasoft_site::config::AppConfig;
use metasoft_site::models::{ServiceInput, TestimonialInput};

fn client_for(server: &MockServer) -> ApiClient {
    let config = AppConfig {
        api_base_url: server.uri(),
        port: 0,
        request_timeout: Duration::from_secs(5),
    };
    ApiClient::new(&config).expect("client")
}

fn service_json(id: i64, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "summary": format!("{title} summary"),
        "description": format!("{title} description")
    })
}

#[tokio::test]
async fn fetch_services_decodes_typed_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            service_json(1, "Web development"),
            service_json(2, "Cloud consulting"),
        ])))
        .mount(&server)
        .await;

    let services = client_for(&server).fetch_services().await.expect("services");

    assert_eq!(services.len(), 2);
    assert_eq!(services[0].title, "Web development");
    assert_eq!(services[1].summary, "Cloud consulting summary");
}

#[tokio::test]
async fn reads_do_not_attach_the_bearer_token() {
    let server = MockServer::start().await;
    // A read carrying an Authorization header would hit this guard first.
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token("secret-token");

    let projects = client.fetch_projects().await.expect("unauthenticated read");
    assert!(projects.is_empty());
}

#[tokio::test]
async fn writes_attach_the_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services"))
        .and(header("authorization", "Bearer secret-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(service_json(3, "SEO audit")))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token("secret-token");

    let input = ServiceInput {
        title: "SEO audit".to_string(),
        summary: "SEO audit summary".to_string(),
        description: "SEO audit description".to_string(),
    };
    let created = client.create_service(&input).await.expect("created");
    assert_eq!(created.id, 3);
}

#[tokio::test]
async fn concurrent_clones_keep_their_own_tokens() {
    // A clone never observes another clone's token, even mid-flight; the
    // backend would answer 404 for a request wearing the wrong bearer.
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/services/1"))
        .and(header("authorization", "Bearer token-a"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/services/2"))
        .and(header("authorization", "Bearer token-b"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let base = client_for(&server);
    let first = base.with_token("token-a");
    let second = base.with_token("token-b");

    let (a, b) = tokio::join!(first.delete_service(1), second.delete_service(2));
    a.expect("token-a delete");
    b.expect("token-b delete");
}

#[tokio::test]
async fn non_ok_status_surfaces_the_generic_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hero"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_hero().await.expect_err("500");
    assert_eq!(err.message(), "Failed to fetch hero section");
}

#[tokio::test]
async fn deleting_a_nonexistent_id_fails_without_panicking() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/testimonials/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token("secret-token");

    let err = client.delete_testimonial(99).await.expect_err("404");
    assert_eq!(err.message(), "Failed to delete testimonial");
}

#[tokio::test]
async fn unknown_fields_are_rejected_at_the_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/theme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "primaryColor": "#2563eb",
            "secondaryColor": "#0f172a",
            "accentColor": "#f59e0b",
            "surfaceColor": "#ffffff",
            "neutralColor": "#64748b",
            "darkMode": false,
            "legacyColor": "#000000"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_theme().await.expect_err("extra field");
    assert_eq!(err.message(), "Failed to decode theme");
}

#[tokio::test]
async fn login_returns_token_and_profile() {
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

    let auth = client_for(&server)
        .login("admin@metasoft.example", "hunter2")
        .await
        .expect("login");
    assert_eq!(auth.access_token, "issued-token");
    assert_eq!(auth.user.role, "ADMIN");
}

#[tokio::test]
async fn rating_payload_is_clamped_upstream_not_here() {
    // The fetch layer passes payloads through untouched; clamping is the
    // form handler's job. A rating of 5 round-trips as-is.
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/testimonials"))
        .and(wiremock::matchers::body_partial_json(json!({ "rating": 5 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "clientName": "Acme",
            "message": "Great work",
            "rating": 5
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token("secret-token");

    let input = TestimonialInput {
        client_name: "Acme".to_string(),
        company: None,
        message: "Great work".to_string(),
        rating: 5,
    };
    let created = client.create_testimonial(&input).await.expect("created");
    assert_eq!(created.rating, 5);
}
