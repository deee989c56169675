//! Error types for cfddns
//!
//! Every failure the updater can hit falls into one of six kinds. None of
//! them are retried: an error ends the current operation and is handed back
//! to the caller with its lower-level cause attached where one exists.

use thiserror::Error;

/// Result type alias for cfddns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed lower-level cause carried by transport and response errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core error type for cfddns
#[derive(Error, Debug)]
pub enum Error {
    /// A required construction input is missing or empty
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No zone matched the requested domain
    #[error("invalid domain: {0}")]
    InvalidDomain(String),

    /// No record matched the requested hostname
    #[error("record not found: {0}")]
    RecordNotFound(String),

    /// Response body was unreadable or lacked an expected identifier
    #[error("invalid response: {message}")]
    InvalidResponse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Non-2xx status, or the request never got a response
    #[error("transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Well-formed response reporting `success: false`
    #[error("{0}")]
    RequestUnsuccessful(String),
}

/// Classification of an [`Error`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    InvalidDomain,
    RecordNotFound,
    InvalidResponse,
    Transport,
    RequestUnsuccessful,
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid domain error
    pub fn invalid_domain(msg: impl Into<String>) -> Self {
        Self::InvalidDomain(msg.into())
    }

    /// Create a "record not found" error
    pub fn record_not_found(msg: impl Into<String>) -> Self {
        Self::RecordNotFound(msg.into())
    }

    /// Create an invalid response error with no underlying cause
    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an invalid response error wrapping its cause
    pub fn invalid_response_with(
        msg: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::InvalidResponse {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// Create a transport error with no underlying cause
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a transport error wrapping its cause
    pub fn transport_with(msg: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// Create a "request was not successful" error for the given cause
    pub fn request_unsuccessful(cause: impl AsRef<str>) -> Self {
        Self::RequestUnsuccessful(format!("request was not successful: {}", cause.as_ref()))
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::InvalidDomain(_) => ErrorKind::InvalidDomain,
            Self::RecordNotFound(_) => ErrorKind::RecordNotFound,
            Self::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::RequestUnsuccessful(_) => ErrorKind::RequestUnsuccessful,
        }
    }
}
