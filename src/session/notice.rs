use std::fmt;

use crate::model::{FormType, RecordId};

/// A user-facing report of something a handler did.
///
/// Returned by value instead of raised as a blocking alert; the presentation
/// layer decides how to show it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SchemaLoaded {
        form_type: FormType,
    },
    SchemaLoadFailed {
        form_type: FormType,
        message: String,
    },
    Submitted {
        form_type: FormType,
        id: RecordId,
    },
    ChangesSaved {
        form_type: FormType,
        id: RecordId,
    },
    /// A record was removed. `edit_cancelled` is set when it was the record
    /// being edited.
    Deleted {
        form_type: FormType,
        edit_cancelled: bool,
    },
    EditCancelled {
        form_type: FormType,
    },
}

impl Notice {
    /// Returns `true` for notices that report a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::SchemaLoadFailed { .. })
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SchemaLoaded { form_type } => write!(f, "{form_type} form loaded"),
            Self::SchemaLoadFailed { form_type, message } => {
                write!(f, "Error loading {form_type} form fields: {message}")
            }
            Self::Submitted { .. } => f.write_str("Form submitted successfully!"),
            Self::ChangesSaved { .. } => f.write_str("Changes saved successfully!"),
            Self::Deleted {
                edit_cancelled: false,
                ..
            } => f.write_str("Entry deleted successfully."),
            Self::Deleted {
                edit_cancelled: true,
                ..
            } => f.write_str("Entry deleted successfully; its edit was cancelled."),
            Self::EditCancelled { .. } => f.write_str("Edit cancelled."),
        }
    }
}
