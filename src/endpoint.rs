//! Transport-agnostic endpoints adapting typed requests onto a [`ClientService`].
//!
//! Endpoints never fail themselves: a service error travels inside the response
//! value so every transport can decide uniformly how to encode it. Each endpoint
//! call is logged with its method, duration and failure.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::errors::ServiceError;
use crate::registry::{Client, ClientService};

/// Implemented by every response type so encoders can branch on failure
/// without inspecting domain errors.
pub trait Failer {
    fn failed(&self) -> Option<&ServiceError>;
}

/// Request parameters for the create method.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub client: Client,
}

/// Response values for the create method.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateClientResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(skip)]
    pub err: Option<ServiceError>,
}

impl Failer for CreateClientResponse {
    fn failed(&self) -> Option<&ServiceError> {
        self.err.as_ref()
    }
}

/// Request parameters for the get method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetClientRequest {
    pub id: String,
}

/// Response values for the get method.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GetClientResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<Client>,
    #[serde(skip)]
    pub err: Option<ServiceError>,
}

impl Failer for GetClientResponse {
    fn failed(&self) -> Option<&ServiceError> {
        self.err.as_ref()
    }
}

/// Request parameters for the delete method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteClientRequest {
    pub id: String,
}

/// Response values for the delete method.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct DeleteClientResponse {
    #[serde(skip)]
    pub err: Option<ServiceError>,
}

impl Failer for DeleteClientResponse {
    fn failed(&self) -> Option<&ServiceError> {
        self.err.as_ref()
    }
}

/// All endpoints that compose the client service.
#[derive(Clone)]
pub struct Endpoints {
    service: Arc<dyn ClientService>,
}

impl Endpoints {
    pub fn new(service: Arc<dyn ClientService>) -> Self {
        Self { service }
    }

    pub async fn create_client(&self, request: CreateClientRequest) -> CreateClientResponse {
        logged("create_client", async {
            match self.service.create_client(request.client).await {
                Ok(client) => CreateClientResponse {
                    client: Some(client),
                    err: None,
                },
                Err(err) => CreateClientResponse {
                    client: None,
                    err: Some(err),
                },
            }
        })
        .await
    }

    pub async fn get_client(&self, request: GetClientRequest) -> GetClientResponse {
        logged("get_client", async {
            match self.service.get_client(&request.id).await {
                Ok(client) => GetClientResponse {
                    client: Some(client),
                    err: None,
                },
                Err(err) => GetClientResponse {
                    client: None,
                    err: Some(err),
                },
            }
        })
        .await
    }

    pub async fn delete_client(&self, request: DeleteClientRequest) -> DeleteClientResponse {
        logged("delete_client", async {
            DeleteClientResponse {
                err: self.service.delete_client(&request.id).await.err(),
            }
        })
        .await
    }
}

/// Run one endpoint call and log how it ended.
async fn logged<R, F>(method: &'static str, call: F) -> R
where
    R: Failer,
    F: Future<Output = R>,
{
    let begin = Instant::now();
    let response = call.await;
    let took = begin.elapsed();

    match response.failed() {
        Some(err) => tracing::info!(method, ?took, failed = %err, "endpoint call"),
        None => tracing::info!(method, ?took, failed = "none", "endpoint call"),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ClientRegistry;
    use crate::registry::service::test_support::*;
    use crate::storage::inmemory::MemoryClientStore;

    async fn test_endpoints() -> Endpoints {
        let registry = ClientRegistry::new(Arc::new(MemoryClientStore::new()))
            .await
            .unwrap();
        Endpoints::new(Arc::new(registry))
    }

    #[tokio::test]
    async fn test_create_and_get_succeed() {
        let endpoints = test_endpoints().await;

        let created = endpoints
            .create_client(CreateClientRequest {
                client: demo_client(),
            })
            .await;
        assert!(created.failed().is_none());
        let created = created.client.unwrap();

        let fetched = endpoints
            .get_client(GetClientRequest {
                id: created.id.clone(),
            })
            .await;
        assert!(fetched.failed().is_none());
        assert_eq!(fetched.client, Some(created));
    }

    #[tokio::test]
    async fn test_errors_are_carried_in_the_response() {
        let endpoints = test_endpoints().await;

        let response = endpoints
            .get_client(GetClientRequest {
                id: "missing".to_string(),
            })
            .await;
        assert!(response.client.is_none());
        assert!(matches!(response.failed(), Some(ServiceError::NotFound(_))));

        let response = endpoints
            .delete_client(DeleteClientRequest {
                id: "missing".to_string(),
            })
            .await;
        assert!(response.failed().is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_reported_by_failer() {
        let registry = ClientRegistry::new(Arc::new(FailingClientStore))
            .await
            .unwrap();
        let endpoints = Endpoints::new(Arc::new(registry));

        let response = endpoints
            .create_client(CreateClientRequest {
                client: demo_client(),
            })
            .await;
        assert!(matches!(response.failed(), Some(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn test_endpoint_calls_are_logged() {
        let endpoints = test_endpoints().await;
        let (logs, _guard) = capture_logs();

        let created = endpoints
            .create_client(CreateClientRequest {
                client: demo_client(),
            })
            .await;
        assert!(created.failed().is_none());
        endpoints
            .get_client(GetClientRequest {
                id: "missing".to_string(),
            })
            .await;

        let output = logs.contents();
        let endpoint_lines: Vec<&str> = output
            .lines()
            .filter(|line| line.contains("endpoint call"))
            .collect();
        assert_eq!(endpoint_lines.len(), 2);
        assert!(endpoint_lines[0].contains("method=\"create_client\""));
        assert!(endpoint_lines[0].contains("failed=\"none\""));
        assert!(endpoint_lines[0].contains("took="));
        assert!(endpoint_lines[1].contains("method=\"get_client\""));
        assert!(endpoint_lines[1].contains("failed=error-registry-service-1"));
    }

    #[test]
    fn test_failed_response_serializes_without_client() {
        let response = GetClientResponse {
            client: None,
            err: Some(ServiceError::NotFound("x".to_string())),
        };
        assert_eq!(serde_json::to_string(&response).unwrap(), "{}");
    }
}
