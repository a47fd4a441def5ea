//! Error types for cv-core

use thiserror::Error;

/// Core error type for covdb
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Invalid configuration value
    #[error("[C002] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C003: Requested target is not defined
    #[error("[C003] Target '{name}' not found. Available targets: {available}")]
    TargetNotFound { name: String, available: String },

    /// C004: Connection URL could not be parsed into a profile
    #[error("[C004] Invalid connection URL '{url}': {reason}")]
    InvalidConnectionUrl { url: String, reason: String },

    /// C005: Completion log has an unexpected layout
    #[error("[C005] Malformed completion log {path} at line {line}: {reason}")]
    CompletionLogParse {
        path: String,
        line: usize,
        reason: String,
    },

    /// C006: IO error
    #[error("[C006] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C007: IO error with file path context
    #[error("[C007] Failed to access '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },

    /// C008: YAML parse error
    #[error("[C008] Config parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
