//! Configuration Types
//!
//! Module configuration supplied once per client or grant flow.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

use crate::error::{OAuth2Result, ValidationError};

/// Complete client configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct ModuleConfig {
    /// Client credentials.
    pub client: ClientConfig,
    /// Authorization server endpoints.
    pub auth: AuthConfig,
    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Request encoding options.
    #[serde(default)]
    pub options: OptionsConfig,
}

impl ModuleConfig {
    /// Create configuration with default paths, HTTP settings and options.
    pub fn new(client: ClientConfig, auth: AuthConfig) -> Self {
        Self {
            client,
            auth,
            http: HttpConfig::default(),
            options: OptionsConfig::default(),
        }
    }

    /// Check the configuration invariants.
    pub fn validate(&self) -> OAuth2Result<()> {
        self.client.validate()?;
        self.auth.validate()?;
        self.http.validate()?;
        self.options.validate()?;
        Ok(())
    }
}

/// Client credentials.
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Client identifier.
    pub id: String,
    /// Client secret.
    pub secret: SecretString,
    /// Body parameter name for the client id.
    #[serde(default = "default_id_param_name")]
    pub id_param_name: String,
    /// Body parameter name for the client secret.
    #[serde(default = "default_secret_param_name")]
    pub secret_param_name: String,
}

fn default_id_param_name() -> String {
    "client_id".to_string()
}

fn default_secret_param_name() -> String {
    "client_secret".to_string()
}

impl ClientConfig {
    /// Create client credentials with the standard parameter names.
    pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            secret: SecretString::new(secret.into()),
            id_param_name: default_id_param_name(),
            secret_param_name: default_secret_param_name(),
        }
    }

    /// Exposed client secret.
    pub fn secret(&self) -> &str {
        self.secret.expose_secret()
    }

    fn validate(&self) -> OAuth2Result<()> {
        if self.id.is_empty() {
            return Err(ValidationError::missing("client.id").into());
        }
        if self.secret.expose_secret().is_empty() {
            return Err(ValidationError::missing("client.secret").into());
        }
        if self.id_param_name.is_empty() {
            return Err(ValidationError::invalid("client.id_param_name", "must not be empty").into());
        }
        if self.secret_param_name.is_empty() {
            return Err(
                ValidationError::invalid("client.secret_param_name", "must not be empty").into(),
            );
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("id", &self.id)
            .field("secret", &"[REDACTED]")
            .field("id_param_name", &self.id_param_name)
            .field("secret_param_name", &self.secret_param_name)
            .finish()
    }
}

/// Authorization server endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Origin of the token, refresh and revoke endpoints.
    pub token_host: Url,
    /// Token endpoint path.
    #[serde(default = "default_token_path")]
    pub token_path: String,
    /// Refresh endpoint path (token path when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_path: Option<String>,
    /// Revocation endpoint path.
    #[serde(default = "default_revoke_path")]
    pub revoke_path: String,
    /// Origin of the authorization endpoint (token host when unset).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize_host: Option<Url>,
    /// Authorization endpoint path, optionally carrying a query string.
    #[serde(default = "default_authorize_path")]
    pub authorize_path: String,
}

fn default_token_path() -> String {
    DEFAULT_TOKEN_PATH.to_string()
}

fn default_revoke_path() -> String {
    DEFAULT_REVOKE_PATH.to_string()
}

fn default_authorize_path() -> String {
    DEFAULT_AUTHORIZE_PATH.to_string()
}

impl AuthConfig {
    /// Create endpoint configuration with the default paths.
    pub fn new(token_host: Url) -> Self {
        Self {
            token_host,
            token_path: default_token_path(),
            refresh_path: None,
            revoke_path: default_revoke_path(),
            authorize_host: None,
            authorize_path: default_authorize_path(),
        }
    }

    /// Host used for the authorization redirect.
    pub fn authorize_host(&self) -> &Url {
        self.authorize_host.as_ref().unwrap_or(&self.token_host)
    }

    /// Path used for refresh requests.
    pub fn refresh_path(&self) -> &str {
        self.refresh_path.as_deref().unwrap_or(&self.token_path)
    }

    fn validate(&self) -> OAuth2Result<()> {
        validate_origin(&self.token_host)?;
        if let Some(host) = &self.authorize_host {
            validate_origin(host)?;
        }

        let paths = [
            ("auth.token_path", Some(&self.token_path)),
            ("auth.refresh_path", self.refresh_path.as_ref()),
            ("auth.revoke_path", Some(&self.revoke_path)),
            ("auth.authorize_path", Some(&self.authorize_path)),
        ];
        for (field, path) in paths {
            if path.is_some_and(|p| p.is_empty()) {
                return Err(ValidationError::invalid(field, "must not be empty").into());
            }
        }
        Ok(())
    }
}

fn validate_origin(url: &Url) -> OAuth2Result<()> {
    let is_http = matches!(url.scheme(), "http" | "https");
    if !is_http || url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(ValidationError::InvalidEndpoint {
            url: url.to_string(),
        }
        .into());
    }
    Ok(())
}

/// HTTP transport settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Headers sent with every request.
    pub headers: HashMap<String, String>,
    /// Request timeout.
    #[serde(with = "duration_millis")]
    pub timeout: Duration,
    /// Maximum redirects followed before failing.
    pub max_redirects: usize,
    /// Maximum accepted response body size in bytes.
    pub max_response_size: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            headers: [("accept".to_string(), "application/json".to_string())]
                .into_iter()
                .collect(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }
}

impl HttpConfig {
    fn validate(&self) -> OAuth2Result<()> {
        if self.timeout.is_zero() {
            return Err(ValidationError::invalid("http.timeout", "must be greater than zero").into());
        }
        if self.max_response_size == 0 {
            return Err(
                ValidationError::invalid("http.max_response_size", "must be greater than zero")
                    .into(),
            );
        }
        Ok(())
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Per-request HTTP options, merged over [`HttpConfig`].
#[derive(Clone, Debug, Default)]
pub struct HttpOptions {
    /// Extra headers. Cannot replace `authorization` or `content-type`.
    pub headers: HashMap<String, String>,
    /// Timeout override.
    pub timeout: Option<Duration>,
}

impl HttpOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Override the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Request encoding options.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Where client credentials are sent.
    pub authorization_method: AuthorizationMethod,
    /// Token request body encoding.
    pub body_format: BodyFormat,
    /// Separator used to join scope lists.
    pub scope_separator: String,
    /// Basic header credential encoding.
    pub credentials_encoding_mode: CredentialsEncodingMode,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            authorization_method: AuthorizationMethod::default(),
            body_format: BodyFormat::default(),
            scope_separator: " ".to_string(),
            credentials_encoding_mode: CredentialsEncodingMode::default(),
        }
    }
}

impl OptionsConfig {
    fn validate(&self) -> OAuth2Result<()> {
        if self.scope_separator.is_empty() {
            return Err(
                ValidationError::invalid("options.scope_separator", "must not be empty").into(),
            );
        }
        Ok(())
    }
}

/// Client credential placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationMethod {
    /// HTTP Basic `Authorization` header.
    #[default]
    Header,
    /// Credentials as body parameters.
    Body,
}

/// Token request body encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyFormat {
    /// `application/x-www-form-urlencoded`.
    Form,
    /// `application/json`.
    #[default]
    Json,
}

impl BodyFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form => "application/x-www-form-urlencoded",
            Self::Json => "application/json",
        }
    }
}

/// How client id and secret are encoded before base64.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialsEncodingMode {
    /// Form-urlencode id and secret first (RFC 6749 §2.3.1).
    #[default]
    Strict,
    /// Use id and secret as-is.
    Loose,
}

/// Grant type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrantType {
    #[serde(rename = "authorization_code")]
    AuthorizationCode,
    #[serde(rename = "client_credentials")]
    ClientCredentials,
    #[serde(rename = "password")]
    Password,
    #[serde(rename = "refresh_token")]
    RefreshToken,
}

impl GrantType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::ClientCredentials => "client_credentials",
            Self::Password => "password",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for GrantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default configuration values.
pub const DEFAULT_TOKEN_PATH: &str = "/oauth/token";
pub const DEFAULT_REVOKE_PATH: &str = "/oauth/revoke";
pub const DEFAULT_AUTHORIZE_PATH: &str = "/oauth/authorize";
pub const DEFAULT_TIMEOUT_MS: u64 = 30000;
pub const DEFAULT_MAX_REDIRECTS: usize = 20;
pub const DEFAULT_MAX_RESPONSE_SIZE: usize = 1048576;
