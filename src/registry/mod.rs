//! OAuth client registry: the client record, the service contract, and its middlewares.

pub mod middleware;
pub mod secrets;
pub mod service;
pub mod types;

pub use middleware::{LoggingMiddleware, ServiceMiddleware, chain, logging_middleware};
pub use secrets::{CredentialGenerator, OsCredentialGenerator};
pub use service::{ClientRegistry, ClientService};
pub use types::Client;

use crate::errors::StorageError;
use crate::storage::traits::ClientStore;
use std::sync::Arc;

/// Build the default service stack: a provisioned registry wrapped in logging.
pub async fn new_service(
    storage: Arc<dyn ClientStore>,
) -> Result<Arc<dyn ClientService>, StorageError> {
    let registry: Arc<dyn ClientService> = Arc::new(ClientRegistry::new(storage).await?);
    Ok(chain(registry, [logging_middleware()]))
}
