//! Axum HTTP transport for the client registry, plus its client-side counterpart.

pub mod client;
pub mod context;
mod handler_clients;
pub mod server;
pub mod utils_encoding;

pub use client::HttpClientService;
pub use context::AppState;
pub use server::{API_PREFIX, build_router};
