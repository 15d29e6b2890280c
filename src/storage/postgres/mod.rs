//! PostgreSQL storage implementations
//!
//! PostgreSQL is suitable for production deployments with several registry
//! instances sharing one database.

mod clients;

pub use clients::PostgresClientStore;
