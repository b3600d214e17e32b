//! Resource Owner Password Credentials Flow
//!
//! RFC 6749 Section 4.3 - Resource Owner Password Credentials Grant.

use crate::client::Client;
use crate::core::{HttpTransport, ReqwestHttpTransport};
use crate::error::OAuth2Result;
use crate::flows::GrantFlow;
use crate::token::AccessToken;
use crate::types::{GrantParameters, GrantType, HttpOptions, ModuleConfig};

/// Resource Owner Password Credentials Flow.
pub struct ResourceOwnerPassword<T: HttpTransport = ReqwestHttpTransport> {
    client: Client<T>,
}

impl ResourceOwnerPassword<ReqwestHttpTransport> {
    /// Create the flow with the default reqwest transport.
    pub fn new(config: ModuleConfig) -> OAuth2Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }
}

impl<T: HttpTransport> ResourceOwnerPassword<T> {
    /// Create the flow with a custom transport.
    pub fn with_transport(config: ModuleConfig, transport: T) -> OAuth2Result<Self> {
        Ok(Self {
            client: Client::with_transport(config, transport)?,
        })
    }

    /// Create the flow over an existing client.
    pub fn with_client(client: Client<T>) -> Self {
        Self { client }
    }

    /// Request a token for `username`/`password`; `params` may add `scope` and
    /// other parameters but cannot replace the credentials.
    pub async fn get_token_with_password(
        &self,
        username: &str,
        password: &str,
        params: GrantParameters,
        http_options: Option<&HttpOptions>,
    ) -> OAuth2Result<AccessToken<T>> {
        let mut params = params;
        params.insert("username", username);
        params.insert("password", password);
        self.get_token(params, http_options).await
    }
}

impl<T: HttpTransport> GrantFlow for ResourceOwnerPassword<T> {
    type Transport = T;

    fn grant_type(&self) -> GrantType {
        GrantType::Password
    }

    fn client(&self) -> &Client<T> {
        &self.client
    }
}
