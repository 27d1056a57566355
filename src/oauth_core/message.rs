//! An immutable request message: HTTP method, endpoint URL and parameters.

use super::problem::Problem;
use super::types::Parameter;

/// A decoded request as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    method: String,
    url: String,
    params: Vec<Parameter>,
}

impl Message {
    pub fn new(method: impl Into<String>, url: impl Into<String>, params: Vec<Parameter>) -> Self {
        Self { method: method.into(), url: url.into(), params }
    }

    /// Builds a message from a form body or query string.
    pub fn from_form(method: impl Into<String>, url: impl Into<String>, form: &str) -> Result<Self, Problem> {
        Ok(Self::new(method, url, Parameter::decode_form(form)?))
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    /// The first present value for `name`. Occurrences without a value are skipped.
    pub fn get_parameter(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .filter(|p| p.name == name)
            .find_map(|p| p.value.as_deref())
    }

    /// Every present value for `name`, in request order.
    pub fn get_parameters<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.params
            .iter()
            .filter(move |p| p.name == name)
            .filter_map(|p| p.value.as_deref())
    }

    /// The first present value for `name`, or `PARAMETER_ABSENT` naming it.
    pub fn require_parameter(&self, name: &str) -> Result<&str, Problem> {
        self.get_parameter(name)
            .ok_or_else(|| Problem::parameter_absent(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth_core::problem::ProblemKind;

    fn message(form: &str) -> Message {
        Message::from_form("POST", "https://server.example.com/token", form).unwrap()
    }

    #[test]
    fn lookup_returns_first_match() {
        let msg = message("scope=read&scope=write");
        assert_eq!(msg.get_parameter("scope"), Some("read"));
        assert_eq!(msg.get_parameters("scope").collect::<Vec<_>>(), ["read", "write"]);
    }

    #[test]
    fn lookup_skips_valueless_occurrences() {
        let msg = message("code&code=abc");
        assert_eq!(msg.get_parameter("code"), Some("abc"));
    }

    #[test]
    fn valueless_only_counts_as_absent() {
        let problem = message("code").require_parameter("code").unwrap_err();
        assert_eq!(problem.kind(), ProblemKind::ParameterAbsent);
        assert_eq!(problem.parameter_name(), Some("code"));
    }

    #[test]
    fn require_names_the_missing_parameter() {
        let msg = message("grant_type=password");
        for name in ["client_id", "", "grant_type2", "GRANT_TYPE"] {
            let problem = msg.require_parameter(name).unwrap_err();
            assert_eq!(problem.kind(), ProblemKind::ParameterAbsent);
            assert_eq!(problem.parameter_name(), Some(name));
        }
    }

    #[test]
    fn malformed_form_is_rejected() {
        let problem = Message::from_form("GET", "/authorize", "client_id=%E2%82").unwrap_err();
        assert_eq!(problem.kind(), ProblemKind::ParameterRejected);
        assert_eq!(problem.parameter_name(), Some("client_id"));
    }

    #[test]
    fn carries_method_and_url() {
        let msg = Message::new("GET", "/authorize", Vec::new());
        assert_eq!(msg.method(), "GET");
        assert_eq!(msg.url(), "/authorize");
        assert!(msg.parameters().is_empty());
    }
}
