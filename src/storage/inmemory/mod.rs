//! In-memory storage implementations
//!
//! Suitable for development and testing; nothing survives a restart.

mod clients;

pub use clients::MemoryClientStore;
