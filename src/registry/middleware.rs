//! Chainable behavior-preserving decorators for [`ClientService`].

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::Result;
use crate::registry::service::ClientService;
use crate::registry::types::Client;

/// A chainable behavior modifier for a client service.
pub type ServiceMiddleware =
    Box<dyn Fn(Arc<dyn ClientService>) -> Arc<dyn ClientService> + Send + Sync>;

/// Wrap `service` with each middleware in turn; the last one is outermost.
pub fn chain(
    service: Arc<dyn ClientService>,
    middlewares: impl IntoIterator<Item = ServiceMiddleware>,
) -> Arc<dyn ClientService> {
    middlewares
        .into_iter()
        .fold(service, |next, middleware| middleware(next))
}

/// Middleware that logs every call once it finishes.
pub fn logging_middleware() -> ServiceMiddleware {
    Box::new(|next| Arc::new(LoggingMiddleware::new(next)))
}

/// Logs method, client ID, elapsed time and error for each wrapped call.
pub struct LoggingMiddleware {
    next: Arc<dyn ClientService>,
}

impl LoggingMiddleware {
    pub fn new(next: Arc<dyn ClientService>) -> Self {
        Self { next }
    }
}

/// Emits one log record when dropped, whichever way the call scope is left.
struct CallLog {
    method: &'static str,
    id: String,
    begin: Instant,
    outcome: Option<std::result::Result<(), String>>,
}

impl CallLog {
    fn start(method: &'static str, id: &str) -> Self {
        Self {
            method,
            id: id.to_string(),
            begin: Instant::now(),
            outcome: None,
        }
    }

    fn record<T>(&mut self, result: &Result<T>) {
        self.outcome = Some(match result {
            Ok(_) => Ok(()),
            Err(err) => Err(err.to_string()),
        });
    }
}

impl Drop for CallLog {
    fn drop(&mut self) {
        let took = self.begin.elapsed();
        match &self.outcome {
            Some(Ok(())) => {
                tracing::info!(method = self.method, id = %self.id, ?took, err = "none", "client service call");
            }
            Some(Err(err)) => {
                tracing::warn!(method = self.method, id = %self.id, ?took, err = %err, "client service call");
            }
            None => {
                tracing::warn!(method = self.method, id = %self.id, ?took, err = "cancelled", "client service call");
            }
        }
    }
}

#[async_trait]
impl ClientService for LoggingMiddleware {
    async fn create_client(&self, client: Client) -> Result<Client> {
        let mut call = CallLog::start("create_client", &client.id);
        let result = self.next.create_client(client).await;
        if let Ok(created) = &result {
            call.id.clone_from(&created.id);
        }
        call.record(&result);
        result
    }

    async fn get_client(&self, client_id: &str) -> Result<Client> {
        let mut call = CallLog::start("get_client", client_id);
        let result = self.next.get_client(client_id).await;
        call.record(&result);
        result
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let mut call = CallLog::start("delete_client", client_id);
        let result = self.next.delete_client(client_id).await;
        call.record(&result);
        result
    }
}
