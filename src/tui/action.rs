//! Actions returned by screen event handlers.

use crate::model::FormType;

use super::app::Screen;

/// An action that a screen handler returns to the [`App`](super::App).
///
/// The `App` interprets these against the [`FormSession`](crate::session::FormSession)
/// and navigates between screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// No state change needed.
    None,
    /// Navigate to the given screen.
    Navigate(Screen),
    /// Switch the active form type and fetch its schema.
    SelectFormType(FormType),
    /// Store a new value for one field of the draft.
    SetField { name: String, value: String },
    /// Validate and commit the draft.
    Submit,
    /// Open the record at `index` of `form_type` for editing.
    EditRecord { form_type: FormType, index: usize },
    /// Remove the record at `index` of `form_type`.
    DeleteRecord { form_type: FormType, index: usize },
    /// Leave edit mode without saving.
    CancelEdit,
    /// Quit the application.
    Quit,
}
