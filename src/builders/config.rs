//! Configuration Builder
//!
//! Fluent builder for the module configuration.

use std::collections::HashMap;
use std::time::Duration;

use url::Url;

use crate::error::{OAuth2Error, OAuth2Result, ValidationError};
use crate::types::{
    AuthConfig, AuthorizationMethod, BodyFormat, ClientConfig, CredentialsEncodingMode,
    HttpConfig, ModuleConfig, OptionsConfig,
};

/// Module configuration builder.
#[derive(Default)]
pub struct ModuleConfigBuilder {
    client_id: Option<String>,
    client_secret: Option<String>,
    id_param_name: Option<String>,
    secret_param_name: Option<String>,
    token_host: Option<String>,
    token_path: Option<String>,
    refresh_path: Option<String>,
    revoke_path: Option<String>,
    authorize_host: Option<String>,
    authorize_path: Option<String>,
    http: HttpConfig,
    options: OptionsConfig,
}

impl ModuleConfigBuilder {
    /// Create new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set client ID.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Set client secret.
    pub fn client_secret(mut self, client_secret: impl Into<String>) -> Self {
        self.client_secret = Some(client_secret.into());
        self
    }

    /// Set the body parameter name for the client ID.
    pub fn id_param_name(mut self, name: impl Into<String>) -> Self {
        self.id_param_name = Some(name.into());
        self
    }

    /// Set the body parameter name for the client secret.
    pub fn secret_param_name(mut self, name: impl Into<String>) -> Self {
        self.secret_param_name = Some(name.into());
        self
    }

    /// Set the token host, e.g. `https://auth.example.com`.
    pub fn token_host(mut self, host: impl Into<String>) -> Self {
        self.token_host = Some(host.into());
        self
    }

    /// Set token path.
    pub fn token_path(mut self, path: impl Into<String>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Set refresh path.
    pub fn refresh_path(mut self, path: impl Into<String>) -> Self {
        self.refresh_path = Some(path.into());
        self
    }

    /// Set revocation path.
    pub fn revoke_path(mut self, path: impl Into<String>) -> Self {
        self.revoke_path = Some(path.into());
        self
    }

    /// Set authorization host.
    pub fn authorize_host(mut self, host: impl Into<String>) -> Self {
        self.authorize_host = Some(host.into());
        self
    }

    /// Set authorization path.
    pub fn authorize_path(mut self, path: impl Into<String>) -> Self {
        self.authorize_path = Some(path.into());
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.http.headers.insert(name.into(), value.into());
        self
    }

    /// Replace the default headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.http.headers = headers;
        self
    }

    /// Set request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    /// Set the maximum number of redirects followed.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.http.max_redirects = max;
        self
    }

    /// Set the maximum response size in bytes.
    pub fn max_response_size(mut self, size: usize) -> Self {
        self.http.max_response_size = size;
        self
    }

    /// Set where client credentials are sent.
    pub fn authorization_method(mut self, method: AuthorizationMethod) -> Self {
        self.options.authorization_method = method;
        self
    }

    /// Set request body format.
    pub fn body_format(mut self, format: BodyFormat) -> Self {
        self.options.body_format = format;
        self
    }

    /// Set the separator used to join scope lists.
    pub fn scope_separator(mut self, separator: impl Into<String>) -> Self {
        self.options.scope_separator = separator.into();
        self
    }

    /// Set how credentials are encoded in the Authorization header.
    pub fn credentials_encoding_mode(mut self, mode: CredentialsEncodingMode) -> Self {
        self.options.credentials_encoding_mode = mode;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> OAuth2Result<ModuleConfig> {
        let client_id = self
            .client_id
            .ok_or_else(|| ValidationError::missing("client.id"))?;
        let client_secret = self
            .client_secret
            .ok_or_else(|| ValidationError::missing("client.secret"))?;
        let token_host = self
            .token_host
            .ok_or_else(|| ValidationError::missing("auth.token_host"))?;

        let mut client = ClientConfig::new(client_id, client_secret);
        if let Some(name) = self.id_param_name {
            client.id_param_name = name;
        }
        if let Some(name) = self.secret_param_name {
            client.secret_param_name = name;
        }

        let mut auth = AuthConfig::new(parse_host(&token_host)?);
        if let Some(path) = self.token_path {
            auth.token_path = path;
        }
        auth.refresh_path = self.refresh_path;
        if let Some(path) = self.revoke_path {
            auth.revoke_path = path;
        }
        auth.authorize_host = self.authorize_host.as_deref().map(parse_host).transpose()?;
        if let Some(path) = self.authorize_path {
            auth.authorize_path = path;
        }

        let config = ModuleConfig {
            client,
            auth,
            http: self.http,
            options: self.options,
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_host(host: &str) -> OAuth2Result<Url> {
    Url::parse(host).map_err(|_| {
        OAuth2Error::Validation(ValidationError::InvalidEndpoint {
            url: host.to_string(),
        })
    })
}

/// Create a new module configuration builder.
pub fn module_config() -> ModuleConfigBuilder {
    ModuleConfigBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ModuleConfigBuilder {
        module_config()
            .client_id("test-client")
            .client_secret("test-secret")
            .token_host("https://auth.example.com")
    }

    #[test]
    fn test_builder_defaults() {
        let config = base().build().unwrap();

        assert_eq!(config.client.id, "test-client");
        assert_eq!(config.client.secret(), "test-secret");
        assert_eq!(config.client.id_param_name, "client_id");
        assert_eq!(config.auth.token_path, "/oauth/token");
        assert_eq!(config.auth.refresh_path(), "/oauth/token");
        assert_eq!(config.auth.revoke_path, "/oauth/revoke");
        assert_eq!(config.auth.authorize_host().as_str(), "https://auth.example.com/");
        assert_eq!(config.http.timeout, Duration::from_secs(30));
        assert_eq!(config.http.max_redirects, 20);
        assert_eq!(
            config.options.authorization_method,
            AuthorizationMethod::Header
        );
        assert_eq!(config.options.body_format, BodyFormat::Json);
        assert_eq!(config.options.scope_separator, " ");
    }

    #[test]
    fn test_builder_overrides() {
        let config = base()
            .id_param_name("app_id")
            .secret_param_name("app_secret")
            .token_path("/token")
            .refresh_path("/refresh")
            .revoke_path("/revoke")
            .authorize_host("https://login.example.com")
            .authorize_path("/authorize")
            .header("User-Agent", "test")
            .timeout(Duration::from_secs(5))
            .max_redirects(3)
            .authorization_method(AuthorizationMethod::Body)
            .body_format(BodyFormat::Form)
            .scope_separator(",")
            .credentials_encoding_mode(CredentialsEncodingMode::Loose)
            .build()
            .unwrap();

        assert_eq!(config.client.secret_param_name, "app_secret");
        assert_eq!(config.auth.refresh_path(), "/refresh");
        assert_eq!(
            config.auth.authorize_host().as_str(),
            "https://login.example.com/"
        );
        assert_eq!(config.http.headers.get("User-Agent").map(String::as_str), Some("test"));
        assert_eq!(config.http.max_redirects, 3);
        assert_eq!(config.options.scope_separator, ",");
        assert_eq!(
            config.options.credentials_encoding_mode,
            CredentialsEncodingMode::Loose
        );
    }

    #[test]
    fn test_builder_missing_client_id() {
        let result = module_config()
            .client_secret("test-secret")
            .token_host("https://auth.example.com")
            .build();

        assert!(matches!(
            result,
            Err(OAuth2Error::Validation(ValidationError::MissingField { ref field })) if field == "client.id"
        ));
    }

    #[test]
    fn test_builder_missing_token_host() {
        let result = module_config()
            .client_id("test-client")
            .client_secret("test-secret")
            .build();

        assert!(matches!(
            result,
            Err(OAuth2Error::Validation(ValidationError::MissingField { .. }))
        ));
    }

    #[test]
    fn test_builder_invalid_host() {
        let result = base().token_host("not a url").build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Validation(ValidationError::InvalidEndpoint { .. }))
        ));

        let result = base().authorize_host("ftp://files.example.com").build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Validation(ValidationError::InvalidEndpoint { .. }))
        ));
    }

    #[test]
    fn test_builder_runs_validation() {
        let result = base().client_secret("").build();
        assert!(matches!(result, Err(OAuth2Error::Validation(_))));

        let result = base().token_path("").build();
        assert!(matches!(
            result,
            Err(OAuth2Error::Validation(ValidationError::InvalidField { .. }))
        ));
    }
}
