//! Simple OAuth2
//!
//! OAuth2 client for the token endpoint side of RFC 6749.
//!
//! # Features
//!
//! - Authorization Code Flow (RFC 6749 Section 4.1)
//! - Resource Owner Password Credentials Flow (RFC 6749 Section 4.3)
//! - Client Credentials Flow (RFC 6749 Section 4.4)
//! - Token Refresh (RFC 6749 Section 6)
//! - Token Revocation (RFC 7009)
//!
//! # Example
//!
//! ```rust,ignore
//! use simple_oauth2::{module_config, AuthorizationCode, GrantFlow, GrantParameters};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = module_config()
//!         .client_id("my-client-id")
//!         .client_secret("my-client-secret")
//!         .token_host("https://provider.com")
//!         .build()?;
//!
//!     let flow = AuthorizationCode::new(config)?;
//!
//!     let url = flow.authorize_url(
//!         &GrantParameters::new()
//!             .with("redirect_uri", "https://myapp.com/callback")
//!             .with("scope", ["openid", "profile"])
//!             .with("state", "xyz"),
//!     )?;
//!     println!("Authorization URL: {}", url);
//!
//!     let token = flow
//!         .get_token(
//!             GrantParameters::new()
//!                 .with("code", "<code>")
//!                 .with("redirect_uri", "https://myapp.com/callback"),
//!             None,
//!         )
//!         .await?;
//!
//!     if token.expired(300) {
//!         let token = token.refresh(GrantParameters::new(), None).await?;
//!         token.revoke_all(None).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `types`: configuration, grant parameters and token hints
//! - `error`: error hierarchy and server response mapping
//! - `core`: credential encoding, request assembly and HTTP transport
//! - `client`: token endpoint client
//! - `flows`: grant flows sharing one token request path
//! - `token`: access token lifecycle (expiry, refresh, revocation)
//! - `builders`: fluent configuration builder

pub mod builders;
pub mod client;
pub mod core;
pub mod error;
pub mod flows;
pub mod token;
pub mod types;

pub use client::Client;

pub use builders::{module_config, ModuleConfigBuilder};

pub use error::{
    create_error_from_response, parse_error_response, HttpError, NetworkError, OAuth2Error,
    OAuth2ErrorResponse, OAuth2Result, ProtocolError, ValidationError,
};

pub use types::{
    // Config
    AuthConfig, AuthorizationMethod, BodyFormat, ClientConfig, CredentialsEncodingMode,
    GrantType, HttpConfig, HttpOptions, ModuleConfig, OptionsConfig,
    // Params
    GrantParameters, ParamValue,
    // Token
    TokenTypeHint,
};

pub use core::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, MockHttpTransport,
    ReqwestHttpTransport,
};

pub use flows::{AuthorizationCode, ClientCredentials, GrantFlow, ResourceOwnerPassword};

pub use token::AccessToken;
