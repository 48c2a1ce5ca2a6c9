use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use tfy_board::BoardError;
use tfy_gate::AuthError;
use thiserror::Error;

/// Failures while configuring or starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("board error: {0}")]
    Board(#[from] BoardError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

/// A request that failed. Rendered as `{"error": "..."}` with the mapped
/// status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The body was not valid JSON for the operation.
    #[error("malformed request body: {0}")]
    BadBody(String),

    #[error("request body exceeds the size limit")]
    BodyTooLarge,

    /// A path id that does not parse names nothing.
    #[error("{0} not found")]
    NotFound(&'static str),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Board(err.into())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadBody(_) => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Board(err) => match err {
                BoardError::InvalidCredentials | BoardError::InvalidToken => {
                    StatusCode::UNAUTHORIZED
                }
                BoardError::BadRequest(_) => StatusCode::BAD_REQUEST,
                BoardError::NotFound(_) => StatusCode::NOT_FOUND,
                BoardError::Forbidden(_) => StatusCode::FORBIDDEN,
                BoardError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
                BoardError::Store(_)
                | BoardError::Crypto(_)
                | BoardError::Config(_)
                | BoardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
