use crate::model::{FormType, SchemaError};

/// Errors that can occur while fetching a schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaLoadError {
    /// The source has no schema for the requested form type.
    #[error("schema not found for form type \"{0}\"")]
    NotFound(FormType),

    /// An I/O error occurred while reading a catalog file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog is not valid JSON or does not match the catalog shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog parsed but describes an inconsistent schema.
    #[error("invalid schema: {0}")]
    Invalid(#[from] SchemaError),

    /// The same form type appears twice in one catalog.
    #[error("form type \"{0}\" is defined more than once")]
    DuplicateFormType(FormType),
}
