//! SQLite storage implementations
//!
//! SQLite is suitable for single-instance deployments and development.

mod clients;

pub use clients::SqliteClientStore;
