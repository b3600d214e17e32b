//! Integration tests for token revocation

use super::*;
use serde_json::json;
use simple_oauth2::{
    AuthorizationCode, GrantFlow, OAuth2Error, TokenTypeHint, ValidationError,
};
use wiremock::matchers::body_json;
use wiremock::ResponseTemplate;

fn stored_token() -> serde_json::Value {
    json!({
        "access_token": "at",
        "refresh_token": "rt",
        "expires_at": "2030-01-01T00:00:00Z"
    })
}

#[tokio::test]
async fn test_revoke_accepts_no_content() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/revoke")
        .and(body_json(json!({"token": "at", "token_type_hint": "access_token"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let flow = AuthorizationCode::new(config_for(&mock_server).build().unwrap()).unwrap();
    let token = flow.create_token(stored_token()).unwrap();

    token.revoke("access_token", None).await.unwrap();
    // Revocation does not alter the local instance.
    assert_eq!(token.access_token(), Some("at"));
}

#[tokio::test]
async fn test_revoke_all_in_order() {
    let mock_server = setup_mock_server().await;

    mock_post("/revoke")
        .and(body_json(json!({"token": "at", "token_type_hint": "access_token"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_post("/revoke")
        .and(body_json(json!({"token": "rt", "token_type_hint": "refresh_token"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = config_for(&mock_server).revoke_path("/revoke").build().unwrap();
    let flow = AuthorizationCode::new(config).unwrap();
    let token = flow.create_token(stored_token()).unwrap();

    token.revoke_all(None).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    let first: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(first["token_type_hint"], "access_token");
}

#[tokio::test]
async fn test_revoke_all_stops_when_access_revoke_fails() {
    let mock_server = setup_mock_server().await;

    mock_post("/oauth/revoke")
        .and(body_json(json!({"token": "at", "token_type_hint": "access_token"})))
        .respond_with(error_response(500, json!({"error": "server_error"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    mock_post("/oauth/revoke")
        .and(body_json(json!({"token": "rt", "token_type_hint": "refresh_token"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let flow = AuthorizationCode::new(config_for(&mock_server).build().unwrap()).unwrap();
    let token = flow.create_token(stored_token()).unwrap();

    let error = token.revoke_all(None).await.unwrap_err();
    assert_eq!(error.status(), Some(500));
}

#[tokio::test]
async fn test_revoke_invalid_type_makes_no_request() {
    let mock_server = setup_mock_server().await;

    let flow = AuthorizationCode::new(config_for(&mock_server).build().unwrap()).unwrap();
    let token = flow.create_token(stored_token()).unwrap();

    let error = token.revoke("id_token", None).await.unwrap_err();
    assert!(matches!(error, OAuth2Error::InvalidTokenType { .. }));

    let error = flow
        .create_token(json!({"access_token": "only"}))
        .unwrap()
        .revoke_hint(TokenTypeHint::RefreshToken, None)
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        OAuth2Error::Validation(ValidationError::MissingToken { .. })
    ));

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
