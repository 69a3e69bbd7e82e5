/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use explorer_core::ExplorerError;
use explorer_discovery::DiscoveryError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] ExplorerError),

    #[error("Upstream error: {0}")]
    Upstream(#[from] DiscoveryError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServerError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Storage(err) => match err {
                ExplorerError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                ExplorerError::Conflict(_) => StatusCode::CONFLICT,
                ExplorerError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                ExplorerError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            ServerError::NotFound(msg) | ServerError::BadRequest(msg) => msg,
            ServerError::Storage(ExplorerError::InvalidInput(msg) | ExplorerError::Conflict(msg)) => {
                msg
            }
            ServerError::Storage(ref e @ ExplorerError::BackendUnavailable(_)) => {
                tracing::warn!("Storage backend unavailable: {}", e);
                "Storage backend unavailable".to_string()
            }
            ServerError::Storage(ref e) => {
                tracing::error!("Storage error: {:?}", e);
                "Storage error".to_string()
            }
            ServerError::Upstream(ref e) => {
                tracing::error!("Upstream error: {}", e);
                "Failed to reach music service".to_string()
            }
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                "Configuration error".to_string()
            }
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
