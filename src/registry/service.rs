//! Client registry service: credential assignment and storage delegation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{Result, ServiceError, StorageError};
use crate::registry::secrets::{CredentialGenerator, OsCredentialGenerator};
use crate::registry::types::Client;
use crate::storage::traits::ClientStore;

/// The operations every client service, and every middleware wrapping one, provides.
#[async_trait]
pub trait ClientService: Send + Sync {
    /// Register a client, assigning it a fresh ID and secret
    async fn create_client(&self, client: Client) -> Result<Client>;

    /// Retrieve a client by ID
    async fn get_client(&self, client_id: &str) -> Result<Client>;

    /// Remove a client by ID
    async fn delete_client(&self, client_id: &str) -> Result<()>;
}

/// Client registry backed by a [`ClientStore`]
pub struct ClientRegistry {
    storage: Arc<dyn ClientStore>,
    generator: Arc<dyn CredentialGenerator>,
}

impl ClientRegistry {
    /// Create a registry over `storage`, provisioning the clients table first.
    ///
    /// An existing table is reused; any other provisioning failure is returned.
    pub async fn new(storage: Arc<dyn ClientStore>) -> std::result::Result<Self, StorageError> {
        Self::with_generator(storage, Arc::new(OsCredentialGenerator)).await
    }

    /// Create a registry with a custom credential generator
    pub async fn with_generator(
        storage: Arc<dyn ClientStore>,
        generator: Arc<dyn CredentialGenerator>,
    ) -> std::result::Result<Self, StorageError> {
        storage.ensure_table().await?;
        Ok(Self { storage, generator })
    }
}

#[async_trait]
impl ClientService for ClientRegistry {
    async fn create_client(&self, mut client: Client) -> Result<Client> {
        client.id = self.generator.client_id()?;
        client.secret = self.generator.client_secret()?;

        self.storage.put_client(&client).await?;
        Ok(client)
    }

    async fn get_client(&self, client_id: &str) -> Result<Client> {
        self.storage
            .get_client(client_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(client_id.to_string()))
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        self.storage.delete_client(client_id).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::errors::GenerationError;
    use std::io::Write;
    use std::sync::Mutex;
    use tracing_subscriber::fmt::MakeWriter;

    /// Store whose every operation fails after provisioning
    pub struct FailingClientStore;

    #[async_trait]
    impl ClientStore for FailingClientStore {
        async fn ensure_table(&self) -> crate::storage::traits::Result<()> {
            Ok(())
        }

        async fn put_client(&self, _client: &Client) -> crate::storage::traits::Result<()> {
            Err(StorageError::QueryFailed("disk full".to_string()))
        }

        async fn get_client(
            &self,
            _client_id: &str,
        ) -> crate::storage::traits::Result<Option<Client>> {
            Err(StorageError::ConnectionFailed("connection reset".to_string()))
        }

        async fn delete_client(&self, _client_id: &str) -> crate::storage::traits::Result<()> {
            Err(StorageError::ConnectionFailed("connection reset".to_string()))
        }
    }

    /// Generator whose random source is unavailable
    pub struct BrokenGenerator;

    impl CredentialGenerator for BrokenGenerator {
        fn client_id(&self) -> std::result::Result<String, GenerationError> {
            Err(GenerationError::RandomnessUnavailable(
                "entropy pool closed".to_string(),
            ))
        }

        fn client_secret(&self) -> std::result::Result<String, GenerationError> {
            Err(GenerationError::RandomnessUnavailable(
                "entropy pool closed".to_string(),
            ))
        }
    }

    /// Log sink shared with the subscriber installed by [`capture_logs`]
    #[derive(Clone, Default)]
    pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        pub fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Route this thread's tracing output into a buffer until the guard drops.
    pub fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (logs, guard)
    }

    pub fn demo_client() -> Client {
        Client {
            name: "demo".to_string(),
            redirect_uri: "https://x/cb".to_string(),
            grant_type: "authorization_code".to_string(),
            response_type: "code".to_string(),
            scope: "read".to_string(),
            public: false,
            ..Default::default()
        }
    }
}
