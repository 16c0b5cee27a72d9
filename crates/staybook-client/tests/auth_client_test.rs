//! Contract tests for AuthClient and the HTTP transport's session handling.

use staybook_client::{ApiClient, ApiConfig, ApiError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(mock_server: &MockServer) -> ApiConfig {
    ApiConfig {
        api_url: format!("{}/api", mock_server.uri()).parse().unwrap(),
        origin: mock_server.uri().parse().unwrap(),
        session_cookie: None,
        timeout_secs: 5,
    }
}

#[tokio::test]
async fn get_authenticated_user_forwards_resync_flag() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-authenticated-user"))
        .and(query_param("forceResync", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "firstName": "Ana",
            "lastName": "Silva",
            "email": "ana@example.com",
            "imageUrl": null,
            "authorities": ["ROLE_TENANT", "ROLE_LANDLORD"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&config_for(&mock_server)).unwrap();
    let user = client.auth().get_authenticated_user(true).await.unwrap();

    assert!(user.is_connected());
    assert!(user.has_any_authority(&["ROLE_LANDLORD"]));
}

#[tokio::test]
async fn get_authenticated_user_401_keeps_auth_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-authenticated-user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&config_for(&mock_server)).unwrap();
    let err = client.auth().get_authenticated_user(false).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(err.url().unwrap().contains("api/auth"));
}

#[tokio::test]
async fn logout_returns_provider_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "logoutUrl": "https://idp.example.com/logout?id_token_hint=x"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&config_for(&mock_server)).unwrap();
    let response = client.auth().logout().await.unwrap();
    assert_eq!(
        response.logout_url,
        "https://idp.example.com/logout?id_token_hint=x"
    );
}

#[tokio::test]
async fn session_cookie_is_sent_on_every_call() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/get-authenticated-user"))
        .and(header("cookie", "JSESSIONID=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "email": "ana@example.com",
            "authorities": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = config_for(&mock_server);
    config.session_cookie = Some(zeroize::Zeroizing::new("JSESSIONID=abc123".into()));
    let client = ApiClient::new(&config).unwrap();
    let user = client.auth().get_authenticated_user(false).await.unwrap();
    assert_eq!(user.email.as_deref(), Some("ana@example.com"));
}

#[tokio::test]
async fn empty_success_body_fails_typed_decode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = ApiClient::new(&config_for(&mock_server)).unwrap();
    let err = client.auth().logout().await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialization { .. }), "got: {err:?}");
}
