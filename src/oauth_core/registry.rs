//! Read-only client lookup.

use super::problem::Problem;
use super::types::Client;

/// Trait for retrieving registered OAuth2 clients.
///
/// Implementations must be safe to share between threads; the validator
/// never writes through this trait.
pub trait ClientRegistry: Send + Sync + 'static {
    /// Retrieves a client by its identifier, failing with `INVALID_CLIENT`
    /// when none is registered.
    fn get_client(&self, client_id: &str) -> Result<Client, Problem>;
}
