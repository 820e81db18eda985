//! Error types for triage

/// Result type alias using triage's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for triage operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source ingestion errors
    #[error("ingest error: {0}")]
    Ingest(String),

    /// No source supplied the canonical table
    #[error("no valid data: no source contained a usable table")]
    NoValidData,

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Workflow rule errors
    #[error("rule error: {0}")]
    Rule(String),

    /// Summary and view errors
    #[error("report error: {0}")]
    Report(String),

    /// Filesystem errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write errors
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new ingest error
    pub fn ingest(msg: impl Into<String>) -> Self {
        Self::Ingest(msg.into())
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new rule error
    pub fn rule(msg: impl Into<String>) -> Self {
        Self::Rule(msg.into())
    }

    /// Create a new report error
    pub fn report(msg: impl Into<String>) -> Self {
        Self::Report(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
