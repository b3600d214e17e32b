//! Token Management
//!
//! Access token lifecycle: expiry checks, refresh and revocation (RFC 7009).

pub mod access_token;

pub use access_token::AccessToken;
