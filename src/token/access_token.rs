//! Access Token
//!
//! Token payload wrapper with expiry normalization, refresh and revocation (RFC 7009).

use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::Client;
use crate::core::{build_grant_params, HttpTransport, ReqwestHttpTransport};
use crate::error::{OAuth2Error, OAuth2Result, ValidationError};
use crate::types::{GrantParameters, GrantType, HttpOptions, TokenTypeHint};

const ACCESS_TOKEN: &str = "access_token";
const REFRESH_TOKEN: &str = "refresh_token";
const EXPIRES_AT: &str = "expires_at";
const EXPIRES_IN: &str = "expires_in";

/// An issued token.
///
/// The payload is kept verbatim except for `expires_at`, which is always
/// normalized to an RFC 3339 timestamp when the payload carries `expires_at`
/// or `expires_in`. Instances never change: [`AccessToken::refresh`] returns a
/// new one, and revocation does not alter local state.
pub struct AccessToken<T: HttpTransport = ReqwestHttpTransport> {
    token: Map<String, Value>,
    expires_at: Option<DateTime<Utc>>,
    client: Client<T>,
}

impl<T: HttpTransport> AccessToken<T> {
    /// Wrap a raw token payload.
    pub fn new(client: Client<T>, payload: Value) -> OAuth2Result<Self> {
        let mut token = match payload {
            Value::Object(map) if !map.is_empty() => map,
            Value::Object(_) => return Err(invalid_token("payload is empty")),
            Value::Null => return Err(invalid_token("payload is missing")),
            _ => return Err(invalid_token("payload must be a JSON object")),
        };

        let expires_at = parse_expiration(&token, Utc::now())?;
        if let Some(at) = expires_at {
            token.insert(
                EXPIRES_AT.to_string(),
                Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            );
        }

        Ok(Self {
            token,
            expires_at,
            client,
        })
    }

    /// Normalized token payload.
    pub fn token(&self) -> &Map<String, Value> {
        &self.token
    }

    /// Payload field by name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.token.get(key)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.string_field(ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.string_field(REFRESH_TOKEN)
    }

    pub fn token_type(&self) -> Option<&str> {
        self.string_field("token_type")
    }

    /// Expiration time, `None` for tokens that never expire.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Payload as JSON, suitable for persisting and restoring with `create_token`.
    pub fn to_json(&self) -> Value {
        Value::Object(self.token.clone())
    }

    /// Format as Authorization header value.
    pub fn authorization_header(&self) -> Option<String> {
        let token_type = self.token_type().unwrap_or("Bearer");
        self.access_token()
            .map(|token| format!("{} {}", token_type, token))
    }

    /// Whether the token expires within `window_secs` seconds from now.
    ///
    /// Tokens without an expiration never expire.
    pub fn expired(&self, window_secs: i64) -> bool {
        let Some(exp) = self.expires_at else {
            return false;
        };
        match Duration::try_seconds(window_secs).and_then(|w| Utc::now().checked_add_signed(w)) {
            Some(bound) => exp <= bound,
            // Window beyond the representable range.
            None => window_secs > 0,
        }
    }

    /// Whether the token has expired.
    pub fn is_expired(&self) -> bool {
        self.expired(0)
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// When the server does not rotate the refresh token, the new instance keeps
    /// the current one.
    #[instrument(skip_all)]
    pub async fn refresh(
        &self,
        params: GrantParameters,
        http_options: Option<&HttpOptions>,
    ) -> OAuth2Result<Self> {
        let refresh_token = self
            .refresh_token()
            .ok_or_else(|| missing_token(TokenTypeHint::RefreshToken))?;

        let mut request_params = params;
        request_params.insert(REFRESH_TOKEN, refresh_token);

        let config = self.client.config();
        let request_params =
            build_grant_params(Some(GrantType::RefreshToken), config, &request_params);

        let response = self
            .client
            .request(config.auth.refresh_path(), &request_params, http_options)
            .await?;

        let payload = match response {
            Some(Value::Object(mut map)) => {
                if map.get(REFRESH_TOKEN).map_or(true, Value::is_null) {
                    debug!("Refresh response carried no refresh token, keeping the current one");
                    map.insert(REFRESH_TOKEN.to_string(), Value::from(refresh_token));
                }
                Value::Object(map)
            }
            other => other.unwrap_or(Value::Null),
        };

        Self::new(self.client.clone(), payload)
    }

    /// Revoke the access or refresh token.
    ///
    /// `token_type` must be `"access_token"` or `"refresh_token"`; anything else
    /// fails before any request is made.
    pub async fn revoke(
        &self,
        token_type: &str,
        http_options: Option<&HttpOptions>,
    ) -> OAuth2Result<()> {
        let hint: TokenTypeHint = token_type.parse()?;
        self.revoke_hint(hint, http_options).await
    }

    /// Revoke the token selected by `hint`.
    #[instrument(skip(self, http_options))]
    pub async fn revoke_hint(
        &self,
        hint: TokenTypeHint,
        http_options: Option<&HttpOptions>,
    ) -> OAuth2Result<()> {
        let token = self
            .string_field(hint.as_str())
            .ok_or_else(|| missing_token(hint))?;

        let params = GrantParameters::new()
            .with("token", token)
            .with("token_type_hint", hint.as_str());

        let config = self.client.config();
        self.client
            .request(&config.auth.revoke_path, &params, http_options)
            .await?;

        debug!(token_type = %hint, "Token revoked");
        Ok(())
    }

    /// Revoke the access token, then the refresh token.
    ///
    /// Stops at the first failure: if the access token cannot be revoked the
    /// refresh token is left untouched. Not atomic across the two requests.
    pub async fn revoke_all(&self, http_options: Option<&HttpOptions>) -> OAuth2Result<()> {
        self.revoke_hint(TokenTypeHint::AccessToken, http_options).await?;

        if self.refresh_token().is_some() {
            self.revoke_hint(TokenTypeHint::RefreshToken, http_options).await?;
        } else {
            debug!("No refresh token to revoke");
        }
        Ok(())
    }

    fn string_field(&self, key: &str) -> Option<&str> {
        self.token.get(key).and_then(Value::as_str)
    }
}

fn invalid_token(message: &str) -> OAuth2Error {
    OAuth2Error::Validation(ValidationError::InvalidToken {
        message: message.to_string(),
    })
}

fn missing_token(hint: TokenTypeHint) -> OAuth2Error {
    OAuth2Error::Validation(ValidationError::MissingToken {
        token_type: hint.as_str().to_string(),
    })
}

/// Canonical expiration time: `expires_at` wins over `expires_in`.
fn parse_expiration(
    token: &Map<String, Value>,
    now: DateTime<Utc>,
) -> OAuth2Result<Option<DateTime<Utc>>> {
    if let Some(value) = token.get(EXPIRES_AT) {
        return parse_expires_at(value).map(Some);
    }
    if let Some(value) = token.get(EXPIRES_IN) {
        return parse_expires_in(value, now).map(Some);
    }
    Ok(None)
}

fn parse_expires_at(value: &Value) -> OAuth2Result<DateTime<Utc>> {
    let parsed = match value {
        Value::Number(n) => match n.as_i64() {
            Some(secs) => Utc.timestamp_opt(secs, 0).single(),
            None => n
                .as_f64()
                .and_then(|secs| Utc.timestamp_millis_opt((secs * 1000.0) as i64).single()),
        },
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| Utc.from_utc_datetime(&naive))
            }),
        _ => None,
    };

    parsed.ok_or_else(|| invalid_token(&format!("cannot parse expires_at: {}", value)))
}

fn parse_expires_in(value: &Value, now: DateTime<Utc>) -> OAuth2Result<DateTime<Utc>> {
    let secs = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    secs.and_then(|secs| secs.checked_mul(1000))
        .and_then(|millis| now.checked_add_signed(Duration::milliseconds(millis)))
        .ok_or_else(|| invalid_token(&format!("cannot parse expires_in: {}", value)))
}

impl<T: HttpTransport> Clone for AccessToken<T> {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
            expires_at: self.expires_at,
            client: self.client.clone(),
        }
    }
}

impl<T: HttpTransport> Serialize for AccessToken<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.token.serialize(serializer)
    }
}

impl<T: HttpTransport> std::fmt::Debug for AccessToken<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token().map(|_| "[REDACTED]"))
            .field("token_type", &self.token_type())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
