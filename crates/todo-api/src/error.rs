use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::TodoError;
use infrastructure::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Todo not found")]
    NotFound,

    /// 本文には `context` だけを返し、原因はサーバー側のログに残す
    #[error("{context}")]
    Storage {
        context: &'static str,
        #[source]
        source: StorageError,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Storage { context, source } = &self {
            tracing::error!(error = %source, "{context}");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<TodoError> for ApiError {
    fn from(e: TodoError) -> Self {
        match e {
            TodoError::Validation(msg) => ApiError::BadRequest(msg),
            TodoError::InvalidFilter(_) => ApiError::BadRequest(e.to_string()),
            TodoError::NotFound(_) => ApiError::NotFound,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected path parameter");
        ApiError::BadRequest("Invalid todo id".to_string())
    }
}

/// ストレージエラーに、クライアントへ返す汎用メッセージを付ける
pub trait StorageContext<T> {
    fn context(self, context: &'static str) -> Result<T, ApiError>;
}

impl<T> StorageContext<T> for Result<T, StorageError> {
    fn context(self, context: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::Storage { context, source })
    }
}
