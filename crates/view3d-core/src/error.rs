//! Error types for the 3D view bridge
use thiserror::Error;

/// Bridge and lifecycle errors
#[derive(Error, Debug)]
pub enum View3dError {
    /// The visualization module could not be loaded
    #[error("Module load error: {0}")]
    ModuleLoad(String),

    /// Invalid configuration value
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML write error: {0}")]
    TomlWrite(#[from] toml::ser::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for bridge operations
pub type Result<T> = std::result::Result<T, View3dError>;
