//! Grant Parameters
//!
//! Merges base grant parameters, caller parameters and the scope.

use crate::types::{GrantParameters, GrantType, ModuleConfig, ParamValue};

const SCOPE: &str = "scope";

/// Build the parameter map for a request.
///
/// With a grant type the base is `{grant_type}`; without one it is the
/// authorization request base `{response_type: code, <id param>: <client id>}`.
/// Caller parameters overlay the base and the scope is placed last, list scopes
/// joined with the configured separator.
pub fn build_grant_params(
    grant_type: Option<GrantType>,
    config: &ModuleConfig,
    params: &GrantParameters,
) -> GrantParameters {
    let mut merged = match grant_type {
        Some(grant_type) => GrantParameters::new().with("grant_type", grant_type.as_str()),
        None => GrantParameters::new()
            .with("response_type", "code")
            .with(config.client.id_param_name.as_str(), config.client.id.as_str()),
    };

    merged.extend(params);

    if let Some(scope) = merged.remove(SCOPE) {
        let scope = match scope {
            ParamValue::Multiple(values) => {
                ParamValue::Single(values.join(&config.options.scope_separator))
            }
            single => single,
        };
        merged.append(SCOPE, scope);
    }

    merged
}
