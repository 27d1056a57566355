//! In-memory default implementation of [`ClientRegistry`].

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use super::problem::{Problem, ProblemKind};
use super::registry::ClientRegistry;
use super::types::Client;

#[derive(Clone, Default)]
pub struct InMemoryClientRegistry {
    clients: Arc<DashMap<String, Client>>,
}

impl InMemoryClientRegistry {
    /// Creates a new in-memory registry with an initial set of clients.
    /// A later client replaces an earlier one with the same identifier.
    pub fn new(initial_clients: Vec<Client>) -> Self {
        let map = DashMap::new();
        for client in initial_clients {
            map.insert(client.client_id.clone(), client);
        }
        Self { clients: Arc::new(map) }
    }

    /// Registers a client, returning the record it replaced, if any.
    pub fn register(&self, client: Client) -> Option<Client> {
        self.clients.insert(client.client_id.clone(), client)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientRegistry for InMemoryClientRegistry {
    fn get_client(&self, client_id: &str) -> Result<Client, Problem> {
        match self.clients.get(client_id) {
            Some(entry) => Ok(entry.value().clone()),
            None => {
                debug!(client_id, "unknown client");
                Err(Problem::unnamed(ProblemKind::InvalidClient))
            }
        }
    }
}
