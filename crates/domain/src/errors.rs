use thiserror::Error;

/// Todo ドメインのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl TodoError {
    /// テキスト未入力エラー
    pub fn text_required() -> Self {
        TodoError::Validation("Todo text is required".to_string())
    }
}
