//! In-memory client storage implementation

use crate::registry::types::Client;
use crate::storage::traits::*;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory implementation of client storage
#[derive(Default)]
pub struct MemoryClientStore {
    clients: RwLock<HashMap<String, Client>>,
}

impl MemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored clients
    pub async fn len(&self) -> usize {
        self.clients.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.clients.read().await.is_empty()
    }
}

#[async_trait]
impl ClientStore for MemoryClientStore {
    async fn ensure_table(&self) -> Result<()> {
        Ok(())
    }

    async fn put_client(&self, client: &Client) -> Result<()> {
        let mut clients = self.clients.write().await;
        clients.insert(client.id.clone(), client.clone());
        Ok(())
    }

    async fn get_client(&self, client_id: &str) -> Result<Option<Client>> {
        let clients = self.clients.read().await;
        Ok(clients.get(client_id).cloned())
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let mut clients = self.clients.write().await;
        clients.remove(client_id);
        Ok(())
    }
}
