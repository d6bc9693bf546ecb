use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// Service-specific error types
///
/// These are the failures the relay itself produces. A JSON-RPC error object
/// returned by the daemon is not one of them: it is relayed to the caller as-is.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Missing or wrong `X-API-KEY` header on a protected route
    #[error("Unauthorized")]
    Unauthorized,

    /// The daemon could not be reached or did not answer in time
    #[error("RPC connection error: {0}")]
    RpcConnection(String),

    /// The daemon answered with something that is not JSON
    #[error("Invalid RPC response: {0}")]
    InvalidRpcResponse(String),

    /// The client's request body could not be used
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Structured error response for the API
#[derive(Serialize)]
struct ErrorResponse {
    /// Human-readable error message
    error: String,

    /// Machine-readable error code
    error_code: String,

    /// Optional detailed error information
    details: Option<String>,
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        let (error_code, details) = match self {
            // Callers match on this exact body, so it carries nothing else.
            ServiceError::Unauthorized => {
                return HttpResponse::build(self.status_code())
                    .json(json!({ "error": "Unauthorized" }));
            }
            ServiceError::RpcConnection(details) => ("RPC_CONNECTION_ERROR", details),
            ServiceError::InvalidRpcResponse(details) => ("INVALID_RPC_RESPONSE", details),
            ServiceError::InvalidRequest(details) => ("INVALID_REQUEST", details),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            error_code: error_code.to_string(),
            details: Some(details.clone()),
        })
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::RpcConnection(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidRpcResponse(_) => StatusCode::BAD_GATEWAY,
            ServiceError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}
