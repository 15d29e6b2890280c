//! Trait-based client storage with in-memory, SQLite, and PostgreSQL backends.

pub mod inmemory;
pub mod traits;

// Feature-gated storage implementations
#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use inmemory::MemoryClientStore;
pub use traits::*;

use crate::errors::StorageError;
use std::sync::Arc;
use std::time::Duration;

/// Storage backend configuration and factory
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    #[cfg(feature = "sqlite")]
    Sqlite(String), // Connection string/path
    #[cfg(feature = "postgres")]
    Postgres(String), // Connection string
}

/// Create a storage backend based on configuration.
///
/// The returned store has not been provisioned yet; the registry service calls
/// [`ClientStore::ensure_table`] when it is constructed.
pub async fn create_storage_backend(
    backend: StorageBackend,
    acquire_timeout: Duration,
) -> std::result::Result<Arc<dyn ClientStore>, StorageError> {
    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryClientStore::new())),
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite(database_url) => {
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .acquire_timeout(acquire_timeout)
                .connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionFailed(format!("SQLite connection failed: {}", e))
                })?;

            Ok(Arc::new(sqlite::SqliteClientStore::new(pool)))
        }
        #[cfg(feature = "postgres")]
        StorageBackend::Postgres(database_url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .acquire_timeout(acquire_timeout)
                .connect(&database_url)
                .await
                .map_err(|e| {
                    StorageError::ConnectionFailed(format!("PostgreSQL connection failed: {}", e))
                })?;

            Ok(Arc::new(postgres::PostgresClientStore::new(pool)))
        }
    }
}

/// Parse storage backend from configuration string
pub fn parse_storage_backend(
    backend_name: &str,
    database_url: Option<&str>,
) -> std::result::Result<StorageBackend, StorageError> {
    match backend_name {
        "memory" => Ok(StorageBackend::Memory),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let url = database_url.unwrap_or("sqlite://clients.db?mode=rwc");
            Ok(StorageBackend::Sqlite(url.to_string()))
        }
        #[cfg(feature = "postgres")]
        "postgres" => {
            let url = database_url.ok_or_else(|| {
                StorageError::InvalidData("DATABASE_URL required for postgres backend".to_string())
            })?;
            Ok(StorageBackend::Postgres(url.to_string()))
        }
        _ => Err(StorageError::InvalidData(format!(
            "Unknown storage backend: {}",
            backend_name
        ))),
    }
}

/// Whether a CREATE TABLE failure only reports that the table is already there.
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub(crate) fn is_table_exists_error(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db_error) => {
            is_table_exists(db_error.code().as_deref(), db_error.message())
        }
        _ => false,
    }
}

/// 42P07 is PostgreSQL's duplicate_table. Concurrent CREATE TABLE on PostgreSQL
/// can instead fail with 23505 on the `pg_type` catalog. SQLite only reports it
/// in the message.
#[cfg(any(feature = "sqlite", feature = "postgres"))]
fn is_table_exists(code: Option<&str>, message: &str) -> bool {
    matches!(code, Some("42P07"))
        || (code == Some("23505") && message.contains("pg_type"))
        || message.contains("already exists")
}
