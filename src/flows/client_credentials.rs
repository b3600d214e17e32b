//! Client Credentials Flow
//!
//! RFC 6749 Section 4.4 - Client Credentials Grant.

use crate::client::Client;
use crate::core::{HttpTransport, ReqwestHttpTransport};
use crate::error::OAuth2Result;
use crate::flows::GrantFlow;
use crate::types::{GrantType, ModuleConfig};

/// Client Credentials Flow. Tokens are issued to the client itself.
pub struct ClientCredentials<T: HttpTransport = ReqwestHttpTransport> {
    client: Client<T>,
}

impl ClientCredentials<ReqwestHttpTransport> {
    /// Create the flow with the default reqwest transport.
    pub fn new(config: ModuleConfig) -> OAuth2Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }
}

impl<T: HttpTransport> ClientCredentials<T> {
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
}

impl<T: HttpTransport> GrantFlow for ClientCredentials<T> {
    type Transport = T;

    fn grant_type(&self) -> GrantType {
        GrantType::ClientCredentials
    }

    fn client(&self) -> &Client<T> {
        &self.client
    }
}
