use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenolensError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TSV parse error: {0}")]
    Tsv(String),

    #[error("Empty dataset: no rows to aggregate")]
    EmptyDataset,

    #[error("Schema mismatch on page {page}: expected {expected} columns, found {found}")]
    SchemaMismatch {
        expected: usize,
        found: usize,
        page: u32,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Security error: {0}")]
    Security(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GenolensError>;
