//! OAuth2 Client
//!
//! Issues POST requests to the authorization server and decodes JSON responses.

use std::sync::Arc;

use tracing::{debug, instrument, warn};
use url::Url;

use crate::core::{HttpMethod, HttpRequest, HttpTransport, RequestOptions, ReqwestHttpTransport};
use crate::error::{
    create_error_from_response, OAuth2Error, OAuth2Result, ProtocolError, ValidationError,
};
use crate::types::{GrantParameters, HttpOptions, ModuleConfig};

/// Token endpoint client. Cloning shares the configuration and transport.
pub struct Client<T: HttpTransport = ReqwestHttpTransport> {
    config: Arc<ModuleConfig>,
    transport: Arc<T>,
}

impl Client<ReqwestHttpTransport> {
    /// Create a client using reqwest, configured from `config.http`.
    pub fn new(config: ModuleConfig) -> OAuth2Result<Self> {
        config.validate()?;
        let transport = ReqwestHttpTransport::from_config(&config.http)?;
        Ok(Self {
            config: Arc::new(config),
            transport: Arc::new(transport),
        })
    }
}

impl<T: HttpTransport> Client<T> {
    /// Create a client with a custom transport.
    pub fn with_transport(config: ModuleConfig, transport: T) -> OAuth2Result<Self> {
        Self::with_shared_transport(config, Arc::new(transport))
    }

    /// Create a client with a transport shared with the caller.
    pub fn with_shared_transport(config: ModuleConfig, transport: Arc<T>) -> OAuth2Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            transport,
        })
    }

    /// Get the module configuration.
    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    /// Resolve `path` against the token host. Absolute URLs are used as-is.
    pub fn resolve_url(&self, path: &str) -> OAuth2Result<Url> {
        self.config.auth.token_host.join(path).map_err(|_| {
            OAuth2Error::Validation(ValidationError::InvalidEndpoint {
                url: format!("{}{}", self.config.auth.token_host, path),
            })
        })
    }

    /// POST `params` to `path` and decode the JSON response.
    ///
    /// Returns `None` when a successful response has no body.
    #[instrument(skip_all, fields(path = %path))]
    pub async fn request(
        &self,
        path: &str,
        params: &GrantParameters,
        http_options: Option<&HttpOptions>,
    ) -> OAuth2Result<Option<serde_json::Value>> {
        let url = self.resolve_url(path)?;
        let options = RequestOptions::build(&self.config, params, http_options);
        let timeout = http_options
            .and_then(|o| o.timeout)
            .unwrap_or(self.config.http.timeout);

        debug!(
            url = %url,
            authorization_method = ?self.config.options.authorization_method,
            body_format = ?self.config.options.body_format,
            "Sending token endpoint request"
        );

        let http_request = HttpRequest {
            method: HttpMethod::Post,
            url: url.to_string(),
            headers: options.headers,
            body: Some(options.payload.to_body()),
            timeout: Some(timeout),
        };

        let response = self.transport.send(http_request).await.map_err(|e| {
            warn!(error = %e, code = e.error_code(), "Token endpoint request failed");
            e
        })?;

        if response.status >= 400 {
            warn!(status = response.status, "Token endpoint returned an error status");
            return Err(create_error_from_response(response.status, &response.body));
        }

        if response.body.trim().is_empty() {
            debug!(status = response.status, "Token endpoint returned an empty body");
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(&response.body).map_err(|e| {
            OAuth2Error::Protocol(ProtocolError::InvalidJson {
                message: e.to_string(),
            })
        })?;

        debug!(status = response.status, "Token endpoint request succeeded");

        Ok(match value {
            serde_json::Value::Null => None,
            value => Some(value),
        })
    }
}

impl<T: HttpTransport> Clone for Client<T> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: HttpTransport> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
