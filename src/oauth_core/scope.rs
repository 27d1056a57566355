//! Scope policy: which scope tokens a client may request.

use std::collections::HashSet;

use super::types::Client;

/// Permitted scope tokens. A client's own `allowed_scopes` take precedence;
/// clients without one fall back to the global set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopePolicy {
    global: HashSet<String>,
}

impl ScopePolicy {
    pub fn new<I, S>(global: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { global: global.into_iter().map(Into::into).collect() }
    }

    pub fn global(&self) -> &HashSet<String> {
        &self.global
    }

    /// The scope set that applies to `client`.
    pub fn allowed_for<'a>(&'a self, client: &'a Client) -> &'a HashSet<String> {
        client.allowed_scopes.as_ref().unwrap_or(&self.global)
    }

    /// RFC 6749 §3.3 `scope-token = 1*( %x21 / %x23-5B / %x5D-7E )`.
    pub fn is_valid_scope_token(token: &str) -> bool {
        !token.is_empty()
            && token
                .bytes()
                .all(|b| matches!(b, 0x21 | 0x23..=0x5B | 0x5D..=0x7E))
    }

    /// Whether every space-separated token in `scope` is well formed and
    /// permitted for `client`.
    pub fn permits(&self, client: &Client, scope: &str) -> bool {
        let allowed = self.allowed_for(client);
        scope
            .split(' ')
            .all(|token| Self::is_valid_scope_token(token) && allowed.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new("https://client.example.com/cb", "s6BhdRkqt3", "gX1fBat3bV")
    }

    #[test]
    fn token_grammar() {
        assert!(ScopePolicy::is_valid_scope_token("read"));
        assert!(ScopePolicy::is_valid_scope_token("https://api.example.com/calendar.readonly"));
        assert!(ScopePolicy::is_valid_scope_token("!#[]~"));
        assert!(!ScopePolicy::is_valid_scope_token(""));
        assert!(!ScopePolicy::is_valid_scope_token("a b"));
        assert!(!ScopePolicy::is_valid_scope_token("say\"hi\""));
        assert!(!ScopePolicy::is_valid_scope_token("back\\slash"));
        assert!(!ScopePolicy::is_valid_scope_token("tab\t"));
        assert!(!ScopePolicy::is_valid_scope_token("é"));
    }

    #[test]
    fn client_scopes_override_global() {
        let policy = ScopePolicy::new(["profile"]);
        let restricted = client().with_allowed_scopes(["read", "write"]);
        assert!(policy.permits(&restricted, "read write"));
        assert!(!policy.permits(&restricted, "profile"));
        assert!(policy.permits(&client(), "profile"));
        assert!(!policy.permits(&client(), "read"));
    }

    #[test]
    fn empty_tokens_are_not_permitted() {
        let policy = ScopePolicy::new(["read", "write"]);
        assert!(!policy.permits(&client(), ""));
        assert!(!policy.permits(&client(), "read  write"));
        assert!(!policy.permits(&client(), " read"));
        assert!(!policy.permits(&client(), "read "));
    }
}
