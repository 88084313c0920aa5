use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use painel_store::StoreError;

#[derive(Debug, Error)]
pub enum ServerError {
    /// No resolvable identity on a protected endpoint.
    #[error("Unauthorized")]
    Unauthorized,

    /// Unknown or malformed resource. The response never says which.
    #[error("Not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownIdentity => ServerError::Unauthorized,
            StoreError::NotFound => ServerError::NotFound,
            StoreError::InvalidCompletion(_) => ServerError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            ServerError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            ServerError::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            ServerError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ServerError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
                    .into_response()
            }
        }
    }
}
