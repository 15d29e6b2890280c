//! Application state shared by every request handler.

use std::sync::Arc;

use crate::config::{Config, ErrorStatusMapping};
use crate::endpoint::Endpoints;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Endpoints wrapping the (middleware-decorated) client service
    pub endpoints: Endpoints,
}

impl AppState {
    pub fn error_status_mapping(&self) -> ErrorStatusMapping {
        self.config.error_status_mapping
    }
}
