//! OAuth2 core primitives: Parameter, Client, Accessor and grant types.

use std::collections::HashSet;

use oauth2_lib::{decode_form, encode_form};
use serde::{Deserialize, Serialize};

use super::problem::Problem;

/// A single decoded form or query parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter value; `None` when the segment carried no `=`.
    pub value: Option<String>,
}

impl Parameter {
    /// Creates a parameter with a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: Some(value.into()) }
    }

    /// Creates a parameter that carries only a name.
    pub fn bare(name: impl Into<String>) -> Self {
        Self { name: name.into(), value: None }
    }

    /// Decodes a form body or query string into parameters, preserving order.
    ///
    /// A malformed percent escape or a non UTF-8 octet sequence fails with
    /// `PARAMETER_REJECTED` naming the raw parameter name of the bad segment.
    pub fn decode_form(form: &str) -> Result<Vec<Parameter>, Problem> {
        let pairs = decode_form(form).map_err(|e| Problem::parameter_rejected(e.name))?;
        Ok(pairs
            .into_iter()
            .map(|(name, value)| Parameter { name, value })
            .collect())
    }

    /// Serialises parameters as application/x-www-form-urlencoded.
    pub fn encode_form(params: &[Parameter]) -> String {
        encode_form(params.iter().map(|p| (p.name.as_str(), p.value.as_deref())))
    }
}

/// Represents a registered OAuth 2.0 client application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client identifier, unique within a registry.
    pub client_id: String,
    /// Shared client secret.
    pub client_secret: String,
    /// The single redirect URI registered for this client.
    pub redirect_uri: String,
    /// Scopes this client may request. `None` defers to the global scope set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_scopes: Option<HashSet<String>>,
}

impl Client {
    /// Creates a client without a scope restriction of its own.
    pub fn new(
        redirect_uri: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            allowed_scopes: None,
        }
    }

    /// Restricts the scopes this client may request.
    pub fn with_allowed_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }
}

/// A client together with the authorization code issued to it.
///
/// The validator only reads an accessor. Issuing a code and recording its
/// consumption are the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessor {
    pub client: Client,
    pub authorized_code: Option<String>,
    pub code_issued_at_ms: Option<i64>,
    pub code_lifetime_ms: i64,
    pub code_used: bool,
}

impl Accessor {
    /// Creates an accessor for a client that holds no code yet.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            authorized_code: None,
            code_issued_at_ms: None,
            code_lifetime_ms: 0,
            code_used: false,
        }
    }

    /// Creates an accessor holding a freshly issued code.
    pub fn with_code(client: Client, code: impl Into<String>, issued_at_ms: i64, lifetime_ms: i64) -> Self {
        Self {
            client,
            authorized_code: Some(code.into()),
            code_issued_at_ms: Some(issued_at_ms),
            code_lifetime_ms: lifetime_ms,
            code_used: false,
        }
    }

    /// Records that the code has been redeemed.
    pub fn mark_code_used(&mut self) {
        self.code_used = true;
    }
}

/// Grant types accepted at the token endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
    Password,
    ClientCredentials,
    RefreshToken,
}

impl GrantType {
    /// The `grant_type` parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrantType::AuthorizationCode => "authorization_code",
            GrantType::Password => "password",
            GrantType::ClientCredentials => "client_credentials",
            GrantType::RefreshToken => "refresh_token",
        }
    }

    /// Parses a `grant_type` value. Matching is exact and case-sensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "authorization_code" => Some(GrantType::AuthorizationCode),
            "password" => Some(GrantType::Password),
            "client_credentials" => Some(GrantType::ClientCredentials),
            "refresh_token" => Some(GrantType::RefreshToken),
            _ => None,
        }
    }
}
