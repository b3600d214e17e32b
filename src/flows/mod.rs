//! OAuth2 Flows
//!
//! Grant flow implementations sharing one token request path:
//!
//! - **Authorization Code** (RFC 6749 Section 4.1): authorization URL and code exchange
//! - **Client Credentials** (RFC 6749 Section 4.4): machine-to-machine tokens
//! - **Resource Owner Password** (RFC 6749 Section 4.3): username/password exchange

pub mod authorization_code;
pub mod client_credentials;
pub mod resource_owner_password;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::core::{build_grant_params, HttpTransport};
use crate::error::OAuth2Result;
use crate::token::AccessToken;
use crate::types::{GrantParameters, GrantType, HttpOptions};

pub use authorization_code::AuthorizationCode;
pub use client_credentials::ClientCredentials;
pub use resource_owner_password::ResourceOwnerPassword;

/// Capability shared by every grant flow.
#[async_trait]
pub trait GrantFlow: Send + Sync {
    /// Transport used by the underlying client.
    type Transport: HttpTransport;

    /// Grant type sent as `grant_type`.
    fn grant_type(&self) -> GrantType;

    /// Client issuing token requests.
    fn client(&self) -> &Client<Self::Transport>;

    /// Request a token from the token endpoint.
    async fn get_token(
        &self,
        params: GrantParameters,
        http_options: Option<&HttpOptions>,
    ) -> OAuth2Result<AccessToken<Self::Transport>> {
        let client = self.client();
        let grant_type = self.grant_type();
        let params = build_grant_params(Some(grant_type), client.config(), &params);

        debug!(grant_type = %grant_type, "Requesting token");

        let response = client
            .request(&client.config().auth.token_path, &params, http_options)
            .await?;

        AccessToken::new(client.clone(), response.unwrap_or(Value::Null))
    }

    /// Wrap a previously issued token payload, e.g. one restored from storage.
    /// No request is made.
    fn create_token(&self, token: Value) -> OAuth2Result<AccessToken<Self::Transport>> {
        AccessToken::new(self.client().clone(), token)
    }
}
