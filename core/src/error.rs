use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid recurrence rule '{rule_id}': {reason}")]
    InvalidRule { rule_id: String, reason: String },

    #[error("Document '{collection}/{doc_id}' not found")]
    DocumentNotFound { collection: String, doc_id: String },

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DeskResult<T> = Result<T, DeskError>;
