use crate::config::ConfigError;
use crate::schema::SchemaLoadError;

/// Errors that can stop the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration could not be read.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The schema source could not be opened.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaLoadError),
}
