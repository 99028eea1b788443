use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Rejected request body: {0}")]
    Rejected(String),

    /// An unclassified failure, reported to the caller only by the action that failed.
    #[error("{0}")]
    Failed(&'static str),
}

impl AppError {
    /// Collapses unclassified failures into a fixed message for `action`.
    /// The underlying cause is logged and never leaves the server.
    pub fn failed(self, action: &'static str) -> Self {
        match self {
            Self::NotFound(_) | Self::Failed(_) => self,
            cause => {
                tracing::error!(error = %cause, "{action}");
                Self::Failed(action)
            }
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) | Self::Rejected(_) | Self::Failed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Database(_) | Self::Internal(_) | Self::Rejected(_) => {
                tracing::error!(error = %self, "unhandled error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// `axum::Json` with body rejections reported as [`AppError::Rejected`].
/// Handlers take it as `Result<Json<T>>` so a bad body fails with
/// the route's own message.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}
