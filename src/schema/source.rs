use futures::future::BoxFuture;

use super::error::SchemaLoadError;
use crate::model::{FormType, Schema};

/// Where form schemas come from.
///
/// Implementations may suspend (a network call, a file read, an artificial
/// delay). An unknown form type must fail with [`SchemaLoadError::NotFound`]
/// rather than resolve to an empty schema.
pub trait SchemaSource: Send + Sync {
    /// Returns the selectable form types, in display order.
    fn form_types(&self) -> Vec<FormType>;

    /// Fetches the schema for `form_type`.
    fn fetch_schema<'a>(
        &'a self,
        form_type: &'a FormType,
    ) -> BoxFuture<'a, Result<Schema, SchemaLoadError>>;
}
