//! Problem taxonomy and its mapping onto RFC 6749 wire error codes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key under which absent and rejected problems name the offending parameter.
pub const PARAMETER_NAME: &str = "parameter_name";

/// Internal problem identifiers. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProblemKind {
    ParameterAbsent,
    ParameterRejected,
    ClientIdMismatch,
    ClientSecretMismatch,
    RedirectUriMismatch,
    UnsupportedResponseType,
    UnsupportedGrantType,
    InvalidScope,
    InvalidClient,
    InvalidRequest,
    InvalidGrant,
    CodeExpired,
    CodeAlreadyUsed,
}

impl ProblemKind {
    /// Every problem kind, in declaration order.
    pub const ALL: [ProblemKind; 13] = [
        ProblemKind::ParameterAbsent,
        ProblemKind::ParameterRejected,
        ProblemKind::ClientIdMismatch,
        ProblemKind::ClientSecretMismatch,
        ProblemKind::RedirectUriMismatch,
        ProblemKind::UnsupportedResponseType,
        ProblemKind::UnsupportedGrantType,
        ProblemKind::InvalidScope,
        ProblemKind::InvalidClient,
        ProblemKind::InvalidRequest,
        ProblemKind::InvalidGrant,
        ProblemKind::CodeExpired,
        ProblemKind::CodeAlreadyUsed,
    ];

    /// The internal identifier, e.g. `PARAMETER_ABSENT`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::ParameterAbsent => "PARAMETER_ABSENT",
            ProblemKind::ParameterRejected => "PARAMETER_REJECTED",
            ProblemKind::ClientIdMismatch => "CLIENT_ID_MISMATCH",
            ProblemKind::ClientSecretMismatch => "CLIENT_SECRET_MISMATCH",
            ProblemKind::RedirectUriMismatch => "REDIRECT_URI_MISMATCH",
            ProblemKind::UnsupportedResponseType => "UNSUPPORTED_RESPONSE_TYPE",
            ProblemKind::UnsupportedGrantType => "UNSUPPORTED_GRANT_TYPE",
            ProblemKind::InvalidScope => "INVALID_SCOPE",
            ProblemKind::InvalidClient => "INVALID_CLIENT",
            ProblemKind::InvalidRequest => "INVALID_REQUEST",
            ProblemKind::InvalidGrant => "INVALID_GRANT",
            ProblemKind::CodeExpired => "CODE_EXPIRED",
            ProblemKind::CodeAlreadyUsed => "CODE_ALREADY_USED",
        }
    }

    /// The RFC 6749 error code this problem is reported as.
    pub fn wire_error(&self) -> WireError {
        match self {
            ProblemKind::ParameterAbsent
            | ProblemKind::ParameterRejected
            | ProblemKind::InvalidRequest
            | ProblemKind::RedirectUriMismatch => WireError::InvalidRequest,
            ProblemKind::UnsupportedResponseType => WireError::UnsupportedResponseType,
            ProblemKind::UnsupportedGrantType => WireError::UnsupportedGrantType,
            ProblemKind::InvalidScope => WireError::InvalidScope,
            ProblemKind::ClientIdMismatch | ProblemKind::InvalidClient => WireError::InvalidClient,
            ProblemKind::ClientSecretMismatch => WireError::UnauthorizedClient,
            ProblemKind::InvalidGrant | ProblemKind::CodeExpired | ProblemKind::CodeAlreadyUsed => {
                WireError::InvalidGrant
            }
        }
    }

    /// Whether problems of this kind carry a `parameter_name` entry.
    pub fn names_parameter(&self) -> bool {
        matches!(self, ProblemKind::ParameterAbsent | ProblemKind::ParameterRejected)
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RFC 6749 §5.2 / §4.1.2.1 error codes emitted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireError {
    InvalidRequest,
    InvalidClient,
    InvalidGrant,
    UnauthorizedClient,
    UnsupportedGrantType,
    UnsupportedResponseType,
    InvalidScope,
}

impl WireError {
    pub fn as_str(&self) -> &'static str {
        match self {
            WireError::InvalidRequest => "invalid_request",
            WireError::InvalidClient => "invalid_client",
            WireError::InvalidGrant => "invalid_grant",
            WireError::UnauthorizedClient => "unauthorized_client",
            WireError::UnsupportedGrantType => "unsupported_grant_type",
            WireError::UnsupportedResponseType => "unsupported_response_type",
            WireError::InvalidScope => "invalid_scope",
        }
    }

    /// HTTP status used at the token endpoint (RFC 6749 §5.2).
    pub fn http_status(&self) -> u16 {
        match self {
            WireError::InvalidClient => 401,
            _ => 400,
        }
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured validation failure.
///
/// `parameters` holds `parameter_name` exactly when the kind is
/// `PARAMETER_ABSENT` or `PARAMETER_REJECTED`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct Problem {
    kind: ProblemKind,
    parameters: BTreeMap<String, String>,
}

impl Problem {
    /// Creates a problem that names no parameter.
    ///
    /// Returns `None` for `PARAMETER_ABSENT` and `PARAMETER_REJECTED`, which
    /// are built with [`Problem::parameter_absent`] and
    /// [`Problem::parameter_rejected`] so they always carry a name.
    pub fn new(kind: ProblemKind) -> Option<Self> {
        if kind.names_parameter() {
            return None;
        }
        Some(Self::unnamed(kind))
    }

    /// Crate callers only pass kinds that name no parameter.
    pub(crate) fn unnamed(kind: ProblemKind) -> Self {
        Self { kind, parameters: BTreeMap::new() }
    }

    /// A required parameter is missing.
    pub fn parameter_absent(name: impl Into<String>) -> Self {
        Self::naming(ProblemKind::ParameterAbsent, name.into())
    }

    /// A parameter is present but could not be accepted.
    pub fn parameter_rejected(name: impl Into<String>) -> Self {
        Self::naming(ProblemKind::ParameterRejected, name.into())
    }

    fn naming(kind: ProblemKind, name: String) -> Self {
        let mut parameters = BTreeMap::new();
        parameters.insert(PARAMETER_NAME.to_string(), name);
        Self { kind, parameters }
    }

    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// The offending parameter, for absent and rejected problems.
    pub fn parameter_name(&self) -> Option<&str> {
        self.parameters.get(PARAMETER_NAME).map(String::as_str)
    }

    /// Shorthand for `self.kind().wire_error()`.
    pub fn wire_error(&self) -> WireError {
        self.kind.wire_error()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parameter_name() {
            Some(name) => write!(f, "{} ({})", self.kind, name),
            None => write!(f, "{}", self.kind),
        }
    }
}
