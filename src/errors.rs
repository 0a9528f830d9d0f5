use astra::Response;
// errors.rs
use std::fmt;

/// Errors originating from either the server logic
/// (routing, bad requests, etc.) or downstream layers (artifacts, datasets).
#[derive(Debug)]
pub enum ServerError {
    NotFound,
    BadRequest(String),
    /// The pricing model or its column schema failed to load at startup.
    /// The server keeps running; predictions report this per request.
    ModelUnavailable,
    DataError(String),
    InternalError,
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::NotFound => write!(f, "Not Found"),
            ServerError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            ServerError::ModelUnavailable => {
                write!(f, "Model or column schema not loaded on server")
            }
            ServerError::DataError(msg) => write!(f, "Data Error: {msg}"),
            ServerError::InternalError => write!(f, "Internal Server Error"),
        }
    }
}

impl std::error::Error for ServerError {}
