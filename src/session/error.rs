use crate::model::{FormType, RecordId, ValidationErrors};

/// Errors returned by [`FormSession`](super::FormSession) handlers.
///
/// None of these are fatal: the session is left in a consistent state and can
/// keep taking input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Required fields are blank; the messages are also kept on the session.
    #[error("{} required field(s) missing", .0.len())]
    Validation(ValidationErrors),

    /// No record exists at the given position.
    #[error("no {form_type} record at position {index}")]
    RecordNotFound {
        /// The collection that was searched.
        form_type: FormType,
        /// The requested position.
        index: usize,
    },

    /// The record being edited disappeared before the edit was saved.
    #[error("{form_type} record {id} no longer exists")]
    StaleRecord {
        /// The collection the record belonged to.
        form_type: FormType,
        /// The vanished record.
        id: RecordId,
    },

    /// The field is not part of the active schema.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// No schema has been loaded yet.
    #[error("no form loaded")]
    NoActiveForm,

    /// A schema request is still in flight.
    #[error("form is still loading")]
    LoadInProgress,
}
