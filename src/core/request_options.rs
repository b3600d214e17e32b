//! Request Options
//!
//! Credential placement and body encoding for token endpoint requests.

use std::collections::HashMap;

use crate::core::credentials::basic_authorization_header;
use crate::types::{AuthorizationMethod, BodyFormat, GrantParameters, HttpOptions, ModuleConfig};

const AUTHORIZATION: &str = "authorization";
const CONTENT_TYPE: &str = "content-type";

/// Encoded request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestPayload {
    /// `application/x-www-form-urlencoded` string.
    Form(String),
    /// JSON object.
    Json(serde_json::Value),
}

impl RequestPayload {
    /// Serialize to the wire body.
    pub fn to_body(&self) -> String {
        match self {
            Self::Form(body) => body.clone(),
            Self::Json(value) => value.to_string(),
        }
    }
}

/// Headers and payload for a token endpoint request.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// Request headers, names lowercased.
    pub headers: HashMap<String, String>,
    /// Request body.
    pub payload: RequestPayload,
}

impl RequestOptions {
    /// Assemble headers and payload.
    ///
    /// Header precedence is configured defaults, then `http_options`, then the
    /// `authorization`/`content-type` headers set here, which always win.
    pub fn build(
        config: &ModuleConfig,
        params: &GrantParameters,
        http_options: Option<&HttpOptions>,
    ) -> Self {
        let mut headers = HashMap::new();
        extend_lowercase(&mut headers, &config.http.headers);
        if let Some(options) = http_options {
            extend_lowercase(&mut headers, &options.headers);
        }

        let client = &config.client;
        let mut params = params.clone();

        match config.options.authorization_method {
            AuthorizationMethod::Header => {
                // Credentials never travel in both places.
                headers.insert(
                    AUTHORIZATION.to_string(),
                    basic_authorization_header(
                        &client.id,
                        client.secret(),
                        config.options.credentials_encoding_mode,
                    ),
                );
            }
            AuthorizationMethod::Body => {
                headers.remove(AUTHORIZATION);
                params.insert(client.id_param_name.as_str(), client.id.as_str());
                params.insert(client.secret_param_name.as_str(), client.secret());
            }
        }

        let format = config.options.body_format;
        headers.insert(CONTENT_TYPE.to_string(), format.content_type().to_string());

        let payload = match format {
            BodyFormat::Form => RequestPayload::Form(params.to_urlencoded()),
            BodyFormat::Json => RequestPayload::Json(params.to_json()),
        };

        Self { headers, payload }
    }

    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

fn extend_lowercase(target: &mut HashMap<String, String>, source: &HashMap<String, String>) {
    for (name, value) in source {
        target.insert(name.to_ascii_lowercase(), value.clone());
    }
}
