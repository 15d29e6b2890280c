//! Standardized error types following the `error-registry-<domain>-<number>` format.

use thiserror::Error;

/// Configuration errors that occur during application startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Error when a required environment variable is not set
    #[error("error-registry-config-1 {0} must be set")]
    EnvVarRequired(String),

    /// Error when HTTP_PORT cannot be parsed
    #[error("error-registry-config-2 Parsing HTTP_PORT into u16 failed: {0:?}")]
    PortParsingFailed(std::num::ParseIntError),

    /// Error when version information is not available
    #[error("error-registry-config-3 One of GIT_HASH or CARGO_PKG_VERSION must be set")]
    VersionNotSet,

    /// Error when duration string cannot be parsed
    #[error("error-registry-config-4 Failed to parse duration '{0}': {1}")]
    DurationParsingFailed(String, String),

    /// Error when the error status mapping is not recognized
    #[error(
        "error-registry-config-5 Unknown error status mapping '{0}': expected collapsed or per-kind"
    )]
    UnknownErrorStatusMapping(String),
}

/// Database/storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error when database connection fails
    #[error("error-registry-storage-1 Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Error when query execution fails
    #[error("error-registry-storage-2 Query execution failed: {0}")]
    QueryFailed(String),

    /// Error when a stored row cannot be read back
    #[error("error-registry-storage-3 Database error: {0}")]
    DatabaseError(String),

    /// Error when data or configuration is invalid
    #[error("error-registry-storage-4 Invalid data: {0}")]
    InvalidData(String),

    /// Error when the clients table cannot be provisioned
    #[error("error-registry-storage-5 Table provisioning failed: {0}")]
    ProvisioningFailed(String),
}

/// Credential generation errors
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The operating system random source failed
    #[error("error-registry-generation-1 Random source unavailable: {0}")]
    RandomnessUnavailable(String),
}

/// How an error should be classified when it crosses the transport boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Internal,
}

/// Errors returned by a client service implementation
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Identifier or secret generation failed
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// No client is stored under the requested identifier
    #[error("error-registry-service-1 Client not found: {0}")]
    NotFound(String),

    /// A remote registry answered with an error envelope
    #[error("error-registry-remote-1 Remote registry returned {status}: {message}")]
    Remote { status: u16, message: String },

    /// A remote registry could not be reached or answered unreadably
    #[error("error-registry-remote-2 Remote registry request failed: {0}")]
    Transport(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Internal,
        }
    }
}

/// HTTP transport errors raised before a request reaches an endpoint
#[derive(Debug, Error)]
pub enum HttpError {
    /// An expected path variable is missing. It always indicates programmer error.
    #[error("error-registry-http-1 Inconsistent mapping between route and handler: {0}")]
    BadRouting(String),

    /// The request body could not be decoded
    #[error("error-registry-http-2 Request decoding failed: {0}")]
    Decode(String),

    /// The response value could not be encoded
    #[error("error-registry-http-3 Response encoding failed: {0}")]
    Encode(String),
}

impl HttpError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HttpError::Decode(_) => ErrorKind::BadRequest,
            HttpError::BadRouting(_) | HttpError::Encode(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
