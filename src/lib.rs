//! OAuth client registry library crate.
//!
//! Stores, retrieves and deletes OAuth client registrations behind an HTTP API.
//! Requests flow through a layered pipeline: the HTTP transport decodes them,
//! endpoints adapt them onto the client service, the service (wrapped in
//! logging middleware) assigns credentials and delegates to a storage backend.

pub mod config;
pub mod endpoint;
pub mod errors;
pub mod http;
pub mod registry;
pub mod storage;
