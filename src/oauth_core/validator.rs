//! Precondition checks for the authorization and token endpoints.
//!
//! Every operation either returns normally or fails with exactly one
//! [`Problem`], the first precondition that did not hold. Operations keep
//! no state between calls; the only collaborators are the injected
//! [`Clock`] and [`ScopePolicy`].

use std::sync::Arc;

use ring::digest;
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

use super::clock::{Clock, SystemClock};
use super::config::ValidatorConfig;
use super::message::Message;
use super::problem::{Problem, ProblemKind};
use super::registry::ClientRegistry;
use super::scope::ScopePolicy;
use super::types::{Accessor, Client, GrantType};

pub const CLIENT_ID: &str = "client_id";
pub const CLIENT_SECRET: &str = "client_secret";
pub const REDIRECT_URI: &str = "redirect_uri";
pub const SCOPE: &str = "scope";
pub const RESPONSE_TYPE: &str = "response_type";
pub const GRANT_TYPE: &str = "grant_type";
pub const CODE: &str = "code";

/// The only `response_type` the authorization endpoint serves.
pub const RESPONSE_TYPE_CODE: &str = "code";

/// Validates OAuth 2.0 requests against registered client state.
#[derive(Clone)]
pub struct OAuth2Validator {
    clock: Arc<dyn Clock>,
    scope_policy: ScopePolicy,
}

impl Default for OAuth2Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl OAuth2Validator {
    /// Creates a validator on the system clock with an empty global scope set.
    pub fn new() -> Self {
        OAuth2Validator {
            clock: Arc::new(SystemClock),
            scope_policy: ScopePolicy::default(),
        }
    }

    /// Creates a validator whose global scopes come from `config`.
    pub fn from_config(config: &ValidatorConfig) -> Self {
        Self::new().with_scope_policy(ScopePolicy::new(config.global_scopes.iter().cloned()))
    }

    /// Sets the clock used for code expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the scope policy.
    pub fn with_scope_policy(mut self, policy: ScopePolicy) -> Self {
        self.scope_policy = policy;
        self
    }

    pub fn scope_policy(&self) -> &ScopePolicy {
        &self.scope_policy
    }

    pub fn current_time_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Checks `client_id` and `client_secret` against the accessor's client.
    ///
    /// Both parameters must be present. The identifier is compared first; the
    /// secret comparison takes the same time whether or not the lengths agree.
    #[instrument(skip_all, level = "debug")]
    pub fn validate_client_id_with_password(&self, msg: &Message, accessor: &Accessor) -> Result<(), Problem> {
        let client_id = msg.require_parameter(CLIENT_ID)?;
        let client_secret = msg.require_parameter(CLIENT_SECRET)?;
        if client_id != accessor.client.client_id {
            return Err(fail(ProblemKind::ClientIdMismatch));
        }
        if !secrets_match(client_secret, &accessor.client.client_secret) {
            return Err(fail(ProblemKind::ClientSecretMismatch));
        }
        Ok(())
    }

    /// Checks `redirect_uri` against the client's registered URI, byte for byte.
    #[instrument(skip_all, level = "debug")]
    pub fn validate_redirect_uri(&self, msg: &Message, client: &Client) -> Result<(), Problem> {
        let redirect_uri = msg.require_parameter(REDIRECT_URI)?;
        if redirect_uri != client.redirect_uri {
            debug!(client_id = %client.client_id, redirect_uri, "redirect_uri does not match registration");
            return Err(fail(ProblemKind::RedirectUriMismatch));
        }
        Ok(())
    }

    /// Checks the optional `scope` parameter against the scope policy.
    #[instrument(skip_all, level = "debug")]
    pub fn validate_scope(&self, msg: &Message, client: &Client) -> Result<(), Problem> {
        let Some(scope) = msg.get_parameter(SCOPE) else {
            return Ok(());
        };
        if !self.scope_policy.permits(client, scope) {
            debug!(client_id = %client.client_id, scope, "scope not permitted");
            return Err(fail(ProblemKind::InvalidScope));
        }
        Ok(())
    }

    /// Checks that `response_type` is `code`.
    ///
    /// A missing `response_type` is reported as `INVALID_REQUEST` without a
    /// parameter name, as the authorization endpoint's wire contract expects.
    #[instrument(skip_all, level = "debug")]
    pub fn validate_response_type(&self, msg: &Message) -> Result<(), Problem> {
        match msg.get_parameter(RESPONSE_TYPE) {
            None => Err(fail(ProblemKind::InvalidRequest)),
            Some(RESPONSE_TYPE_CODE) => Ok(()),
            Some(_) => Err(fail(ProblemKind::UnsupportedResponseType)),
        }
    }

    /// Checks that `grant_type` names a supported grant and returns it.
    #[instrument(skip_all, level = "debug")]
    pub fn validate_grant_type(&self, msg: &Message) -> Result<GrantType, Problem> {
        let grant_type = msg.require_parameter(GRANT_TYPE)?;
        GrantType::parse(grant_type).ok_or_else(|| fail(ProblemKind::UnsupportedGrantType))
    }

    /// Checks `code` against the code held by the accessor.
    ///
    /// The code must match, must be younger than its lifetime at the current
    /// clock reading, and must not have been redeemed before.
    #[instrument(skip_all, level = "debug")]
    pub fn validate_authorization_code(&self, msg: &Message, accessor: &Accessor) -> Result<(), Problem> {
        let code = msg.require_parameter(CODE)?;
        let matches = accessor
            .authorized_code
            .as_deref()
            .is_some_and(|issued| secrets_match(code, issued));
        if !matches {
            return Err(fail(ProblemKind::InvalidGrant));
        }
        let Some(issued_at) = accessor.code_issued_at_ms else {
            debug!(client_id = %accessor.client.client_id, "code has no issue time");
            return Err(fail(ProblemKind::InvalidGrant));
        };
        let age = self.clock.now_millis().saturating_sub(issued_at);
        if age >= accessor.code_lifetime_ms {
            debug!(age_ms = age, lifetime_ms = accessor.code_lifetime_ms, "code expired");
            return Err(fail(ProblemKind::CodeExpired));
        }
        if accessor.code_used {
            debug!(client_id = %accessor.client.client_id, "code replayed");
            return Err(fail(ProblemKind::CodeAlreadyUsed));
        }
        Ok(())
    }

    /// Resolves the client named by `client_id`.
    #[instrument(skip_all, level = "debug")]
    pub fn lookup_client<R>(&self, msg: &Message, registry: &R) -> Result<Client, Problem>
    where
        R: ClientRegistry + ?Sized,
    {
        let client_id = msg.require_parameter(CLIENT_ID)?;
        registry.get_client(client_id)
    }

    /// Runs the authorization endpoint checks in order: client, redirect URI,
    /// response type, scope. Returns the resolved client.
    pub fn validate_authorization_request<R>(&self, msg: &Message, registry: &R) -> Result<Client, Problem>
    where
        R: ClientRegistry + ?Sized,
    {
        let client = self.lookup_client(msg, registry)?;
        self.validate_redirect_uri(msg, &client)?;
        self.validate_response_type(msg)?;
        self.validate_scope(msg, &client)?;
        Ok(client)
    }

    /// Runs the token endpoint checks in order: grant type, client
    /// credentials, then for the authorization code grant the code and the
    /// redirect URI. Returns the requested grant.
    pub fn validate_token_request(&self, msg: &Message, accessor: &Accessor) -> Result<GrantType, Problem> {
        let grant_type = self.validate_grant_type(msg)?;
        self.validate_client_id_with_password(msg, accessor)?;
        if grant_type == GrantType::AuthorizationCode {
            self.validate_authorization_code(msg, accessor)?;
            self.validate_redirect_uri(msg, &accessor.client)?;
        }
        Ok(grant_type)
    }
}

fn fail(kind: ProblemKind) -> Problem {
    debug!(problem = %kind, "validation failed");
    Problem::unnamed(kind)
}

/// Compares two secrets through their SHA-256 digests so the time taken does
/// not depend on where they differ or whether their lengths agree.
fn secrets_match(supplied: &str, expected: &str) -> bool {
    let supplied = digest::digest(&digest::SHA256, supplied.as_bytes());
    let expected = digest::digest(&digest::SHA256, expected.as_bytes());
    supplied.as_ref().ct_eq(expected.as_ref()).into()
}
