use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, CheatsheetError>;

#[derive(Debug, Error)]
pub enum CheatsheetError {
    #[error("invalid sheet name: {0}")]
    InvalidName(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub operation: String,
    pub trace_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword_path: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CheatsheetError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "INVALID_NAME",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    pub fn to_payload(
        &self,
        operation: impl Into<String>,
        keyword_path: Option<Vec<String>>,
    ) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            operation: operation.into(),
            trace_id: Uuid::new_v4().to_string(),
            keyword_path,
            details: None,
        }
    }
}

pub(crate) fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.join(" > ")
}
