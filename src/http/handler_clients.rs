//! Handles /api/v0/clients - create, get and delete OAuth client registrations

use axum::{
    body::Bytes,
    extract::{Path, State, rejection::PathRejection},
    response::Response,
};

use super::utils_encoding::{encode_http_error, encode_response};
use crate::{
    endpoint::{CreateClientRequest, DeleteClientRequest, GetClientRequest},
    errors::HttpError,
    http::context::AppState,
    registry::Client,
};

/// Decode a JSON client body into a create request.
fn decode_create_client_request(body: &[u8]) -> Result<CreateClientRequest, HttpError> {
    let client: Client =
        serde_json::from_slice(body).map_err(|e| HttpError::Decode(e.to_string()))?;
    Ok(CreateClientRequest { client })
}

/// Pull the `{id}` path variable, which the route table guarantees is present.
fn decode_client_id(path: Result<Path<String>, PathRejection>) -> Result<String, HttpError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| HttpError::BadRouting(rejection.body_text()))
}

/// POST /api/v0/clients
pub async fn create_client_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let mapping = state.error_status_mapping();
    let request = match decode_create_client_request(&body) {
        Ok(request) => request,
        Err(err) => return encode_http_error(mapping, &err),
    };

    let response = state.endpoints.create_client(request).await;
    encode_response(mapping, &response)
}

/// GET /api/v0/clients/{id}
pub async fn get_client_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let mapping = state.error_status_mapping();
    let id = match decode_client_id(path) {
        Ok(id) => id,
        Err(err) => return encode_http_error(mapping, &err),
    };

    let response = state.endpoints.get_client(GetClientRequest { id }).await;
    encode_response(mapping, &response)
}

/// DELETE /api/v0/clients/{id}
pub async fn delete_client_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Response {
    let mapping = state.error_status_mapping();
    let id = match decode_client_id(path) {
        Ok(id) => id,
        Err(err) => return encode_http_error(mapping, &err),
    };

    let response = state
        .endpoints
        .delete_client(DeleteClientRequest { id })
        .await;
    encode_response(mapping, &response)
}
