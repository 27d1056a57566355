//! Rendering problems as RFC 6749 error responses.

use oauth2_lib::encode_form;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::problem::{Problem, ProblemKind, WireError};

/// The JSON error body returned by the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: WireError,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_parameter: Option<String>,
}

/// A token endpoint error ready to be written by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenErrorResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

fn description(kind: ProblemKind) -> &'static str {
    match kind {
        ProblemKind::ParameterAbsent => "A required parameter is missing",
        ProblemKind::ParameterRejected => "A parameter could not be decoded",
        ProblemKind::ClientIdMismatch => "Client identifier does not match",
        ProblemKind::ClientSecretMismatch => "Client authentication failed",
        ProblemKind::RedirectUriMismatch => "Redirect URI does not match the registered value",
        ProblemKind::UnsupportedResponseType => "Only the code response type is supported",
        ProblemKind::UnsupportedGrantType => "Grant type is not supported",
        ProblemKind::InvalidScope => "Requested scope is invalid or not permitted",
        ProblemKind::InvalidClient => "Client is not registered",
        ProblemKind::InvalidRequest => "The request is missing a required parameter",
        ProblemKind::InvalidGrant => "Authorization code is invalid",
        ProblemKind::CodeExpired => "Authorization code has expired",
        ProblemKind::CodeAlreadyUsed => "Authorization code has already been used",
    }
}

impl From<&Problem> for ErrorResponse {
    fn from(problem: &Problem) -> Self {
        ErrorResponse {
            error: problem.wire_error(),
            error_description: Some(description(problem.kind()).to_string()),
            error_parameter: problem.parameter_name().map(str::to_string),
        }
    }
}

impl Problem {
    /// The wire error body for this problem.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::from(self)
    }

    /// Convert this problem into a token endpoint JSON response with proper status.
    pub fn into_token_response(&self) -> TokenErrorResponse {
        let error = self.wire_error();
        let status = error.http_status();
        // Structured log
        warn!(problem = %self.kind(), error_code = %error, http_status = status, "OAuth request rejected");
        let body = serde_json::to_string(&self.to_error_response()).unwrap_or_default();
        TokenErrorResponse { status, content_type: "application/json", body }
    }

    /// Appends `error`, `error_description` and, when given, `state` to a
    /// validated redirect URI, for errors at the authorization endpoint.
    /// Any fragment on the URI is dropped.
    ///
    /// Only call this once the redirect URI itself has been validated; if it
    /// has not, the host renders an error page instead.
    pub fn redirect_with_error(&self, redirect_uri: &str, state: Option<&str>) -> String {
        let error = self.wire_error();
        warn!(problem = %self.kind(), error_code = %error, "OAuth authorization request rejected");
        let mut pairs = vec![
            ("error", Some(error.as_str())),
            ("error_description", Some(description(self.kind()))),
        ];
        if let Some(state) = state {
            pairs.push(("state", Some(state)));
        }
        let query = encode_form(pairs);
        // Redirection endpoints carry no fragment (RFC 6749 §3.1.2).
        let redirect_uri = redirect_uri.split_once('#').map_or(redirect_uri, |(base, _)| base);
        let separator = if redirect_uri.ends_with('?') || redirect_uri.ends_with('&') {
            ""
        } else if redirect_uri.contains('?') {
            "&"
        } else {
            "?"
        };
        format!("{redirect_uri}{separator}{query}")
    }
}
