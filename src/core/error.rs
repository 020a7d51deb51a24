// Centralized error handling for the timetable client

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error - please check your connection and ensure the backend server is running";

/// Errors surfaced to callers of the API client.
///
/// A 401 never shows up here: the client clears the session and resolves
/// to `Ok(None)` instead.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Client { status: u16, message: String },

    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Network(#[source] reqwest::Error),

    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("Session storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Classify a non-success response.
    ///
    /// The message is the body's `error` field, then its `message` field, then
    /// a fallback that carries the status code.
    pub fn from_status(status: StatusCode, body: &Value) -> Self {
        let code = status.as_u16();
        let server_message = server_message(body);

        match code {
            403 => ApiError::Forbidden(server_message.unwrap_or_else(|| {
                format!("Access forbidden - insufficient permissions (HTTP {})", code)
            })),
            404 => ApiError::NotFound(
                server_message.unwrap_or_else(|| format!("Resource not found (HTTP {})", code)),
            ),
            500..=599 => ApiError::Server {
                status: code,
                message: server_message.unwrap_or_else(|| {
                    format!("Server error - please try again later (HTTP {})", code)
                }),
            },
            _ => ApiError::Client {
                status: code,
                message: server_message
                    .unwrap_or_else(|| format!("Request failed with status {}", code)),
            },
        }
    }

    /// HTTP status behind the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Forbidden(_) => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } | ApiError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

fn server_message(body: &Value) -> Option<String> {
    ["error", "message"].iter().find_map(|field| {
        body.get(field)
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

/// Errors from the session storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path}: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session storage lock poisoned")]
    Poisoned,
}

pub type ApiResult<T> = Result<Option<T>, ApiError>;
