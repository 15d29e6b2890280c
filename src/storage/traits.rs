//! Storage trait definitions for client records.

use crate::errors::StorageError;
use crate::registry::types::Client;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Name of the single logical table holding client records.
pub const CLIENTS_TABLE: &str = "clients";

/// Trait for storing and retrieving OAuth clients keyed by client ID
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Create the clients table if it does not already exist
    async fn ensure_table(&self) -> Result<()>;

    /// Store a client, overwriting any record with the same ID
    async fn put_client(&self, client: &Client) -> Result<()>;

    /// Retrieve a client by ID
    async fn get_client(&self, client_id: &str) -> Result<Option<Client>>;

    /// Delete a client. Deleting an absent ID is not an error.
    async fn delete_client(&self, client_id: &str) -> Result<()>;
}
