//! Client Credentials Encoding
//!
//! HTTP Basic credentials for the token endpoint (RFC 6749 §2.3.1).

use base64::Engine;
use url::form_urlencoded;

use crate::types::CredentialsEncodingMode;

/// Encode `id:secret` as base64.
///
/// In strict mode both halves are `application/x-www-form-urlencoded` first, as
/// RFC 6749 Appendix B requires. Loose mode keeps them verbatim, which some
/// servers expect for secrets containing reserved characters.
pub fn encode_credentials(client_id: &str, client_secret: &str, mode: CredentialsEncodingMode) -> String {
    let credentials = match mode {
        CredentialsEncodingMode::Strict => {
            format!("{}:{}", form_encode(client_id), form_encode(client_secret))
        }
        CredentialsEncodingMode::Loose => format!("{}:{}", client_id, client_secret),
    };
    base64::engine::general_purpose::STANDARD.encode(credentials)
}

/// `Authorization` header value for the given credentials.
pub fn basic_authorization_header(
    client_id: &str,
    client_secret: &str,
    mode: CredentialsEncodingMode,
) -> String {
    format!("Basic {}", encode_credentials(client_id, client_secret, mode))
}

fn form_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
