mod field;
mod heading;
mod record;
mod schema;
mod validation;

pub use field::{FieldDescriptor, FieldKind};
pub use heading::format_heading;
pub use record::{Draft, Record, RecordId};
pub use schema::{FormType, Schema, SchemaError};
pub use validation::{ValidationErrors, compute_progress, validate};
