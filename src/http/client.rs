//! HTTP client transport: a [`ClientService`] backed by a remote registry.

use async_trait::async_trait;
use reqwest::{Response, StatusCode, Url};

use super::server::API_PREFIX;
use super::utils_encoding::ErrorWrapper;
use crate::endpoint::{CreateClientResponse, GetClientResponse};
use crate::errors::{Result, ServiceError};
use crate::registry::{Client, ClientService};

/// Talks to a registry server's `/api/v0/clients` routes.
#[derive(Clone)]
pub struct HttpClientService {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpClientService {
    pub fn new(http_client: reqwest::Client, base_url: &str) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn clients_url(&self) -> String {
        format!("{}{}/clients", self.base_url, API_PREFIX)
    }

    /// URL of one client, with the ID escaped as a single path segment.
    ///
    /// Returns `None` for IDs no URL path can carry (empty, `.` or `..`). The
    /// server never assigns those, so no such client exists.
    fn client_url(&self, client_id: &str) -> Result<Option<Url>> {
        if matches!(client_id, "" | "." | "..") {
            return Ok(None);
        }

        let mut url = Url::parse(&self.clients_url())
            .map_err(|e| ServiceError::Transport(format!("invalid registry URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ServiceError::Transport("registry URL cannot have a path".to_string()))?
            .push(client_id);
        Ok(Some(url))
    }

    /// Turn a non-success response into the error it carries.
    async fn decode_error(response: Response) -> ServiceError {
        let status = response.status();
        let message = match response.json::<ErrorWrapper>().await {
            Ok(wrapper) => wrapper.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };

        if status == StatusCode::NOT_FOUND {
            ServiceError::NotFound(message)
        } else {
            ServiceError::Remote {
                status: status.as_u16(),
                message,
            }
        }
    }

    fn missing_client(status: StatusCode) -> ServiceError {
        ServiceError::Remote {
            status: status.as_u16(),
            message: "response did not contain a client".to_string(),
        }
    }
}

fn transport_error(error: reqwest::Error) -> ServiceError {
    ServiceError::Transport(error.to_string())
}

#[async_trait]
impl ClientService for HttpClientService {
    async fn create_client(&self, client: Client) -> Result<Client> {
        let response = self
            .http_client
            .post(self.clients_url())
            .json(&client)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body: CreateClientResponse = response.json().await.map_err(transport_error)?;
        body.client.ok_or_else(|| Self::missing_client(status))
    }

    async fn get_client(&self, client_id: &str) -> Result<Client> {
        let Some(url) = self.client_url(client_id)? else {
            return Err(ServiceError::NotFound(client_id.to_string()));
        };

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::decode_error(response).await);
        }

        let body: GetClientResponse = response.json().await.map_err(transport_error)?;
        body.client.ok_or_else(|| Self::missing_client(status))
    }

    async fn delete_client(&self, client_id: &str) -> Result<()> {
        let Some(url) = self.client_url(client_id)? else {
            return Ok(());
        };

        let response = self
            .http_client
            .delete(url)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_are_built_under_api_prefix() {
        let service = HttpClientService::new(reqwest::Client::new(), "http://localhost:8080/");
        assert_eq!(service.clients_url(), "http://localhost:8080/api/v0/clients");
        assert_eq!(
            service.client_url("abc").unwrap().unwrap().as_str(),
            "http://localhost:8080/api/v0/clients/abc"
        );
    }

    #[test]
    fn test_client_id_is_escaped_as_one_segment() {
        let service = HttpClientService::new(reqwest::Client::new(), "http://localhost:8080");

        let url = service.client_url("nope/../abc").unwrap().unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v0/clients/nope%2F..%2Fabc"
        );

        let url = service.client_url("a?b#c%d").unwrap().unwrap();
        assert_eq!(url.path(), "/api/v0/clients/a%3Fb%23c%25d");
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_unaddressable_client_ids() {
        let service = HttpClientService::new(reqwest::Client::new(), "http://localhost:8080");
        for id in ["", ".", ".."] {
            assert!(service.client_url(id).unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn test_unaddressable_ids_resolve_without_a_request() {
        // Nothing listens on port 9; any request would be a transport error.
        let service = HttpClientService::new(reqwest::Client::new(), "http://127.0.0.1:9");

        assert!(matches!(
            service.get_client("..").await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(service.delete_client("..").await.is_ok());
        assert!(service.delete_client("").await.is_ok());
    }
}
