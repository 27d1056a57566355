//! Validator configuration.

use serde::{Deserialize, Serialize};

use super::types::{Accessor, Client};

/// Lifetime of an authorization code unless configured otherwise (10 minutes).
pub const DEFAULT_CODE_LIFETIME_MS: i64 = 600_000;

/// Settings a host loads once and hands to [`OAuth2Validator::from_config`].
///
/// [`OAuth2Validator::from_config`]: super::validator::OAuth2Validator::from_config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Scopes permitted to clients that have no scope list of their own.
    pub global_scopes: Vec<String>,
    /// Lifetime given to codes issued through [`ValidatorConfig::issue_code`].
    pub code_lifetime_ms: i64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            global_scopes: Vec::new(),
            code_lifetime_ms: DEFAULT_CODE_LIFETIME_MS,
        }
    }
}

impl ValidatorConfig {
    /// Parses a JSON configuration document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds an accessor for a code issued at `issued_at_ms` with the configured lifetime.
    pub fn issue_code(
        &self,
        client: Client,
        code: impl Into<String>,
        issued_at_ms: i64,
    ) -> Accessor {
        Accessor::with_code(client, code, issued_at_ms, self.code_lifetime_ms)
    }
}
