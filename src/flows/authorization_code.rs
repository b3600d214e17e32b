//! Authorization Code Flow
//!
//! RFC 6749 Section 4.1 - Authorization Code Grant.

use crate::client::Client;
use crate::core::{build_grant_params, HttpTransport, ReqwestHttpTransport};
use crate::error::{OAuth2Error, OAuth2Result, ValidationError};
use crate::flows::GrantFlow;
use crate::types::{GrantParameters, GrantType, ModuleConfig};

/// Authorization Code Flow.
pub struct AuthorizationCode<T: HttpTransport = ReqwestHttpTransport> {
    client: Client<T>,
}

impl AuthorizationCode<ReqwestHttpTransport> {
    /// Create the flow with the default reqwest transport.
    pub fn new(config: ModuleConfig) -> OAuth2Result<Self> {
        Ok(Self {
            client: Client::new(config)?,
        })
    }
}

impl<T: HttpTransport> AuthorizationCode<T> {
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

    /// Build the URL the resource owner is redirected to.
    ///
    /// Query parameters already present on the authorize path are kept, but
    /// `response_type` and the client id always take their computed values.
    /// Parameters in `params` (e.g. `redirect_uri`, `scope`, `state`) override both.
    pub fn authorize_url(&self, params: &GrantParameters) -> OAuth2Result<String> {
        let config = self.client.config();
        let mut url = config
            .auth
            .authorize_host()
            .join(&config.auth.authorize_path)
            .map_err(|_| {
                OAuth2Error::Validation(ValidationError::InvalidEndpoint {
                    url: format!("{}{}", config.auth.authorize_host(), config.auth.authorize_path),
                })
            })?;

        let mut query = GrantParameters::new();
        for (key, value) in url.query_pairs() {
            query.push(key.into_owned(), value.into_owned());
        }
        query.extend(&build_grant_params(None, config, params));

        url.set_query(Some(&query.to_urlencoded()));

        Ok(url.to_string())
    }
}

impl<T: HttpTransport> GrantFlow for AuthorizationCode<T> {
    type Transport = T;

    fn grant_type(&self) -> GrantType {
        GrantType::AuthorizationCode
    }

    fn client(&self) -> &Client<T> {
        &self.client
    }
}
