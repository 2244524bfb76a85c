//! Integration tests for the API gateway client: header attachment, error
//! normalization, and the empty-body tolerance.

mod fixtures;

use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use habitctl::api::ApiErrorKind;
use habitctl::api::types::LoginRequest;

#[tokio::test]
async fn test_bearer_token_attached_from_store() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/habbits/habbits"))
        .and(header("authorization", format!("Bearer {}", fixtures::TEST_TOKEN).as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([fixtures::habit(1, "Run")])))
        .expect(1)
        .mount(&server)
        .await;

    let api = fixtures::client(&server.uri(), &dir);
    let habits = api.habits().await.unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].title, "Run");
    assert_eq!(habits[0].description, None);
}

#[tokio::test]
async fn test_login_sends_no_auth_header() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::token("tok")))
        .expect(1)
        .mount(&server)
        .await;

    // Even with a token on disk, login must not carry it.
    let api = fixtures::client(&server.uri(), &dir);
    api.login(&LoginRequest {
        username: "alice".to_string(),
        password: "secret1".to_string(),
    })
    .await
    .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_missing_token_sends_no_auth_header() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/habbits/habbits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let api = fixtures::anon_client(&server.uri(), &dir);
    api.habits().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_status_error_surfaces_server_detail() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(fixtures::detail("Invalid username or password")),
        )
        .mount(&server)
        .await;

    let api = fixtures::anon_client(&server.uri(), &dir);
    let err = api
        .login(&LoginRequest {
            username: "alice".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Status);
    assert_eq!(err.status, Some(400));
    assert_eq!(err.message, "Invalid username or password");
    assert!(err.body.is_some());
}

#[tokio::test]
async fn test_status_error_generic_message_without_body() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/habbits/habbits"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let api = fixtures::client(&server.uri(), &dir);
    let err = api.habits().await.unwrap_err();

    assert_eq!(err.status, Some(502));
    assert_eq!(err.message, "Request failed");
}

#[tokio::test]
async fn test_empty_success_body_is_tolerated() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    // The completion endpoints sometimes answer with nothing useful; an
    // unparseable body must not fail the call.
    Mock::given(method("POST"))
        .and(path("/completions/1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let api = fixtures::client(&server.uri(), &dir);
    assert!(api.complete(1).await.is_ok());
}

#[tokio::test]
async fn test_unexpected_shape_is_a_decode_error() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/habbits/habbits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nope": true})))
        .mount(&server)
        .await;

    let api = fixtures::client(&server.uri(), &dir);
    let err = api.habits().await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Decode);
}

#[tokio::test]
async fn test_completed_today_and_streak_unwrap_their_fields() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/completions/7/today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::completed_today(true)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/completions/7/streak"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"streak": 12})))
        .mount(&server)
        .await;

    let api = fixtures::client(&server.uri(), &dir);
    assert!(api.completed_today(7).await.unwrap());
    assert_eq!(api.streak(7).await.unwrap(), 12);
}
