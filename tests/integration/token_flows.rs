//! Integration tests for token acquisition and refresh

use super::*;
use serde_json::json;
use simple_oauth2::{
    AuthorizationCode, AuthorizationMethod, BodyFormat, ClientCredentials, GrantFlow,
    GrantParameters, HttpOptions, NetworkError, OAuth2Error, ProtocolError,
    ResourceOwnerPassword,
};
use std::time::Duration;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_authorization_code_with_body_credentials_json() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/token")
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "grant_type": "authorization_code",
            "code": "c",
            "redirect_uri": "http://cb",
            "client_id": "id",
            "client_secret": "secret"
        })))
        .respond_with(success_response(json!({
            "access_token": "at",
            "refresh_token": "rt",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server)
        .authorization_method(AuthorizationMethod::Body)
        .build()
        .unwrap();
    let flow = AuthorizationCode::new(config).unwrap();

    let params = GrantParameters::new()
        .with("code", "c")
        .with("redirect_uri", "http://cb");
    let token = flow.get_token(params, None).await.unwrap();

    assert_eq!(token.access_token(), Some("at"));
    assert_eq!(token.refresh_token(), Some("rt"));
    assert!(!token.expired(60));
    assert!(token.get("expires_at").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_client_credentials_with_header_credentials_form() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/token")
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(header("x-request-id", "req-1"))
        .and(body_string("grant_type=client_credentials&scope=read+write"))
        .respond_with(success_response(json!({"access_token": "cc"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server)
        .body_format(BodyFormat::Form)
        .build()
        .unwrap();
    let flow = ClientCredentials::new(config).unwrap();

    let options = HttpOptions::new().header("X-Request-Id", "req-1");
    let token = flow
        .get_token(
            GrantParameters::new().with("scope", ["read", "write"]),
            Some(&options),
        )
        .await
        .unwrap();

    assert_eq!(token.access_token(), Some("cc"));
    assert!(token.expires_at().is_none());
    assert!(!token.is_expired());
}

#[tokio::test]
async fn test_password_grant_custom_token_path() {
    let mock_server = setup_mock_server().await;

    mock_post("/token")
        .and(body_json(json!({
            "grant_type": "password",
            "username": "alice",
            "password": "secret-pw",
            "scope": "profile"
        })))
        .respond_with(success_response(json!({"access_token": "pw"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server).token_path("/token").build().unwrap();
    let flow = ResourceOwnerPassword::new(config).unwrap();

    let token = flow
        .get_token_with_password(
            "alice",
            "secret-pw",
            GrantParameters::new().with("scope", "profile"),
            None,
        )
        .await
        .unwrap();
    assert_eq!(token.access_token(), Some("pw"));
}

#[tokio::test]
async fn test_refresh_keeps_refresh_token_when_not_rotated() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/refresh")
        .and(body_json(json!({
            "grant_type": "refresh_token",
            "refresh_token": "rt"
        })))
        .respond_with(success_response(json!({"access_token": "at2", "expires_in": 60})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server)
        .refresh_path("/oauth/refresh")
        .build()
        .unwrap();
    let flow = AuthorizationCode::new(config).unwrap();
    let token = flow
        .create_token(json!({"access_token": "at", "refresh_token": "rt", "expires_in": 0}))
        .unwrap();
    assert!(token.is_expired());

    let refreshed = token.refresh(GrantParameters::new(), None).await.unwrap();
    assert_eq!(refreshed.access_token(), Some("at2"));
    assert_eq!(refreshed.refresh_token(), Some("rt"));
    assert!(!refreshed.is_expired());

    // The original instance is unchanged.
    assert_eq!(token.access_token(), Some("at"));
}

#[tokio::test]
async fn test_http_error_carries_status_and_body() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/token")
        .respond_with(error_response(
            400,
            json!({"error": "invalid_grant", "error_description": "code expired"}),
        ))
        .mount(&mock_server)
        .await;

    let flow = AuthorizationCode::new(config_for(&mock_server).build().unwrap()).unwrap();
    let error = flow
        .get_token(GrantParameters::new().with("code", "old"), None)
        .await
        .unwrap_err();

    assert!(error.is_server_rejection());
    assert_eq!(error.status(), Some(400));
    let OAuth2Error::Http(http) = error else {
        panic!("expected HTTP error");
    };
    let response = http.error_response().unwrap();
    assert_eq!(response.error, "invalid_grant");
    assert_eq!(response.error_description.as_deref(), Some("code expired"));
}

#[tokio::test]
async fn test_non_json_success_body_is_protocol_error() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/token")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&mock_server)
        .await;

    let flow = ClientCredentials::new(config_for(&mock_server).build().unwrap()).unwrap();
    let error = flow.get_token(GrantParameters::new(), None).await.unwrap_err();

    assert!(matches!(
        error,
        OAuth2Error::Protocol(ProtocolError::InvalidJson { .. })
    ));
    assert!(!error.is_server_rejection());
}

#[tokio::test]
async fn test_too_many_redirects() {
    let mock_server = setup_mock_server().await;

    for (from, to) in [("/oauth/token", "/a"), ("/a", "/b"), ("/b", "/c")] {
        Mock::given(path(from))
            .respond_with(
                ResponseTemplate::new(307).insert_header("location", format!("{}{}", mock_server.uri(), to)),
            )
            .mount(&mock_server)
            .await;
    }
    Mock::given(method("POST"))
        .and(path("/c"))
        .respond_with(success_response(json!({"access_token": "unreachable"})))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server).max_redirects(2).build().unwrap();
    let flow = ClientCredentials::new(config).unwrap();
    let error = flow.get_token(GrantParameters::new(), None).await.unwrap_err();

    assert!(matches!(
        error,
        OAuth2Error::Network(NetworkError::TooManyRedirects { max: 2 })
    ));
}

#[tokio::test]
async fn test_timeout_from_http_options() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/token")
        .respond_with(
            success_response(json!({"access_token": "late"})).set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let flow = ClientCredentials::new(config_for(&mock_server).build().unwrap()).unwrap();
    let options = HttpOptions::new().timeout(Duration::from_millis(100));
    let error = flow
        .get_token(GrantParameters::new(), Some(&options))
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        OAuth2Error::Network(NetworkError::Timeout { timeout }) if timeout == Duration::from_millis(100)
    ));
}

#[tokio::test]
async fn test_response_size_limit() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/token")
        .respond_with(success_response(json!({"access_token": "x".repeat(256)})))
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server)
        .max_response_size(64)
        .build()
        .unwrap();
    let flow = ClientCredentials::new(config).unwrap();
    let error = flow.get_token(GrantParameters::new(), None).await.unwrap_err();

    assert!(matches!(
        error,
        OAuth2Error::Protocol(ProtocolError::ResponseTooLarge { .. })
    ));
}
