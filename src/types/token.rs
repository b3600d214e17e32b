//! Token Types
//!
//! Token type hints used by revocation requests.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::OAuth2Error;

/// Token type hint (RFC 7009 §2.1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenTypeHint {
    AccessToken,
    RefreshToken,
}

impl TokenTypeHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
        }
    }
}

impl std::fmt::Display for TokenTypeHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenTypeHint {
    type Err = OAuth2Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "access_token" => Ok(Self::AccessToken),
            "refresh_token" => Ok(Self::RefreshToken),
            other => Err(OAuth2Error::InvalidTokenType {
                token_type: other.to_string(),
            }),
        }
    }
}
