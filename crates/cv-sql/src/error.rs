//! Error types for cv-sql

use thiserror::Error;

/// SQL script errors
#[derive(Error, Debug)]
pub enum SqlError {
    /// SQL could not be tokenized (S001)
    #[error("[S001] SQL tokenize error at line {line}, column {column}: {message}")]
    Tokenize {
        message: String,
        line: usize,
        column: usize,
    },

    /// Script file could not be read (S002)
    #[error("[S002] Failed to read script '{path}': {source}")]
    ScriptRead {
        path: String,
        source: std::io::Error,
    },

    /// A `:name` placeholder has no bound value (S003)
    #[error("[S003] No value bound for parameter ':{0}'")]
    UnboundParameter(String),
}

/// Result type alias for SqlError
pub type SqlResult<T> = Result<T, SqlError>;
