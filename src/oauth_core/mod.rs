//! OAuth2 core: request model, problem taxonomy and the validator.

pub mod clock;
pub mod config;
pub mod memory;
pub mod message;
pub mod problem;
pub mod registry;
pub mod response;
pub mod scope;
pub mod types;
pub mod validator;
