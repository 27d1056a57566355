//! Request validation for OAuth 2.0 authorization servers (RFC 6749).
//!
//! A host decodes a request into a [`Message`], fetches the candidate
//! [`Client`] or [`Accessor`], and runs [`OAuth2Validator`] operations in
//! the order its endpoint requires. A failed check yields a [`Problem`],
//! which maps onto the RFC 6749 error code through [`Problem::wire_error`].
//!
//! ```
//! use oauth2_validator::{Accessor, Client, Message, OAuth2Validator, ProblemKind};
//!
//! let client = Client::new("https://client.example.com/cb", "s6BhdRkqt3", "gX1fBat3bV");
//! let accessor = Accessor::new(client);
//! let msg = Message::from_form("POST", "/token", "client_id=s6BhdRkqt3&client_secret=invalid").unwrap();
//!
//! let problem = OAuth2Validator::new()
//!     .validate_client_id_with_password(&msg, &accessor)
//!     .unwrap_err();
//! assert_eq!(problem.kind(), ProblemKind::ClientSecretMismatch);
//! assert_eq!(problem.wire_error().as_str(), "unauthorized_client");
//! ```

pub mod oauth_core;

pub use oauth_core::clock::{Clock, FixedClock, SystemClock};
pub use oauth_core::config::{ValidatorConfig, DEFAULT_CODE_LIFETIME_MS};
pub use oauth_core::memory::InMemoryClientRegistry;
pub use oauth_core::message::Message;
pub use oauth_core::problem::{Problem, ProblemKind, WireError, PARAMETER_NAME};
pub use oauth_core::registry::ClientRegistry;
pub use oauth_core::response::{ErrorResponse, TokenErrorResponse};
pub use oauth_core::scope::ScopePolicy;
pub use oauth_core::types::{Accessor, Client, GrantType, Parameter};
pub use oauth_core::validator::OAuth2Validator;
