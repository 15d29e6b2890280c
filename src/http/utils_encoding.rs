//! Wire encoding shared by the client handlers.

use axum::response::{IntoResponse, Response};
use http::{HeaderValue, StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::config::ErrorStatusMapping;
use crate::endpoint::Failer;
use crate::errors::{ErrorKind, HttpError};

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Error envelope written for every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorWrapper {
    pub error: String,
}

/// Map an error kind onto an HTTP status under the configured policy.
pub fn err_to_status(mapping: ErrorStatusMapping, kind: ErrorKind) -> StatusCode {
    match mapping {
        ErrorStatusMapping::Collapsed => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorStatusMapping::PerKind => match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        )],
        body,
    )
        .into_response()
}

/// Write the `{"error": ...}` envelope for a failure of the given kind.
pub fn encode_error(mapping: ErrorStatusMapping, kind: ErrorKind, message: String) -> Response {
    let status = err_to_status(mapping, kind);
    let envelope = ErrorWrapper { error: message };
    match serde_json::to_vec(&envelope) {
        Ok(body) => json_response(status, body),
        Err(e) => {
            tracing::error!(error = ?e, "failed to encode error envelope");
            status.into_response()
        }
    }
}

pub fn encode_http_error(mapping: ErrorStatusMapping, err: &HttpError) -> Response {
    tracing::error!(error = %err, "transport error");
    encode_error(mapping, err.kind(), err.to_string())
}

/// Encode an endpoint response, writing the error envelope when it reports a failure.
pub fn encode_response<R>(mapping: ErrorStatusMapping, response: &R) -> Response
where
    R: Serialize + Failer,
{
    if let Some(err) = response.failed() {
        return encode_error(mapping, err.kind(), err.to_string());
    }

    match serde_json::to_vec(response) {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(e) => encode_http_error(mapping, &HttpError::Encode(e.to_string())),
    }
}
