//! Schema sources and background loading.
//!
//! A [`SchemaSource`] answers "which fields does this form type have?". The
//! built-in [`MockSchemaSource`] simulates a slow remote service;
//! [`CatalogSchemaSource`] reads a JSON catalog from disk. [`SchemaLoader`]
//! runs fetches on the tokio runtime and hands back [`LoadCompletion`]s
//! tagged with the [`LoadTicket`] that requested them.

mod catalog;
mod error;
mod loader;
mod mock;
mod source;

pub use catalog::{Catalog, CatalogSchemaSource};
pub use error::SchemaLoadError;
pub use loader::{LoadCompletion, LoadTicket, SchemaLoader};
pub use mock::{DEFAULT_LATENCY, MockSchemaSource};
pub use source::SchemaSource;
