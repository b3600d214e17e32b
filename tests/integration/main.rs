//! Integration tests using WireMock
//!
//! These tests drive the grant flows and token lifecycle through the reqwest
//! transport against a mock authorization server.

mod revocation;
mod token_flows;

use simple_oauth2::{module_config, ModuleConfigBuilder};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockBuilder, MockServer, ResponseTemplate};

/// Helper to create a mock authorization server
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Configuration builder pointed at the mock server
pub fn config_for(server: &MockServer) -> ModuleConfigBuilder {
    module_config()
        .client_id("id")
        .client_secret("secret")
        .token_host(server.uri())
}

/// Helper to create a POST mock for an endpoint path
pub fn mock_post(endpoint: &str) -> MockBuilder {
    Mock::given(method("POST")).and(path(endpoint))
}

/// Helper to create success response templates
pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Helper to create error response templates
pub fn error_response(status: u16, error_body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(error_body)
}
