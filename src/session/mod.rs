//! The form session controller.
//!
//! [`FormSession`] owns every piece of mutable form state: the active schema,
//! the draft, validation errors, edit mode and the [`RecordStore`]. Progress
//! is never stored; it is derived from the schema and draft on demand.
//!
//! Schema loads are split in two so the caller controls where the fetch runs:
//! [`FormSession::select_form_type`] issues a [`LoadTicket`], and
//! [`FormSession::apply_schema`] applies the matching [`LoadCompletion`].
//! Only the most recently issued ticket is honoured, so a slow response for
//! a form type the user has already moved away from is dropped.

mod error;
mod notice;
mod store;

use chrono::Utc;

pub use error::SessionError;
pub use notice::Notice;
pub use store::RecordStore;

use crate::model::{
    Draft, FormType, Record, RecordId, Schema, ValidationErrors, compute_progress, validate,
};
use crate::schema::{LoadCompletion, LoadTicket, SchemaSource};

/// Whether a submit creates a new record or saves over an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Idle,
    /// Submitting replaces the record with this id.
    Editing(RecordId),
}

/// Single owner of all form state for one user session.
#[derive(Debug, Default)]
pub struct FormSession {
    active_form_type: Option<FormType>,
    schema: Option<Schema>,
    draft: Draft,
    errors: ValidationErrors,
    loading: Option<LoadTicket>,
    generation: u64,
    edit_mode: EditMode,
    /// Record to rehydrate into the draft once the pending load lands.
    pending_edit: Option<RecordId>,
    last_submission_succeeded: bool,
    store: RecordStore,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Schema loading ---

    /// Makes `form_type` the active selection and issues a ticket for its schema.
    ///
    /// Any edit in progress is abandoned. The current schema and draft stay in
    /// place until the load completes.
    pub fn select_form_type(&mut self, form_type: FormType) -> LoadTicket {
        self.abandon_edit();
        self.last_submission_succeeded = false;
        self.begin_load(form_type)
    }

    /// Applies a finished schema request.
    ///
    /// Returns `None` when `completion` belongs to a superseded request; state
    /// is untouched in that case. On success the schema is replaced and the
    /// draft and errors reset (or the draft is filled from the record being
    /// edited). On failure the previous schema and draft are kept and the
    /// selection falls back to the loaded schema's form type.
    pub fn apply_schema(&mut self, completion: LoadCompletion) -> Option<Notice> {
        let LoadCompletion { ticket, result } = completion;
        if self.loading.as_ref() != Some(&ticket) {
            tracing::debug!(
                form_type = %ticket.form_type(),
                generation = ticket.generation(),
                "ignoring superseded schema load"
            );
            return None;
        }
        self.loading = None;

        match result {
            Ok(schema) => {
                let draft = self
                    .pending_edit
                    .take()
                    .and_then(|id| self.store.find(schema.form_type(), id))
                    .map(Record::to_draft)
                    .unwrap_or_default();
                let form_type = schema.form_type().clone();
                tracing::info!(form_type = %form_type, fields = schema.len(), "schema loaded");
                self.active_form_type = Some(form_type.clone());
                self.schema = Some(schema);
                self.draft = draft;
                self.errors.clear();
                Some(Notice::SchemaLoaded { form_type })
            }
            Err(e) => {
                tracing::warn!(form_type = %ticket.form_type(), error = %e, "schema load failed");
                if self.pending_edit.take().is_some() {
                    self.edit_mode = EditMode::Idle;
                }
                self.active_form_type = self.schema.as_ref().map(|s| s.form_type().clone());
                Some(Notice::SchemaLoadFailed {
                    form_type: ticket.form_type().clone(),
                    message: e.to_string(),
                })
            }
        }
    }

    /// Selects `form_type` and loads its schema from `source` in one step.
    pub async fn load_schema(
        &mut self,
        source: &dyn SchemaSource,
        form_type: FormType,
    ) -> Option<Notice> {
        let ticket = self.select_form_type(form_type);
        let result = source.fetch_schema(ticket.form_type()).await;
        self.apply_schema(LoadCompletion { ticket, result })
    }

    fn begin_load(&mut self, form_type: FormType) -> LoadTicket {
        self.generation += 1;
        let ticket = LoadTicket::new(form_type.clone(), self.generation);
        tracing::debug!(form_type = %form_type, generation = self.generation, "schema requested");
        self.active_form_type = Some(form_type);
        self.loading = Some(ticket.clone());
        ticket
    }

    // --- Draft ---

    /// Stores `value` for `name` as typed; nothing is trimmed or checked.
    ///
    /// Validation errors are left alone until the next submit.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), SessionError> {
        let schema = self.schema.as_ref().ok_or(SessionError::NoActiveForm)?;
        if !schema.contains(name) {
            return Err(SessionError::UnknownField(name.to_string()));
        }
        self.draft.insert(name.to_string(), value.into());
        Ok(())
    }

    // --- Submit / edit / delete ---

    /// Validates the draft and commits it.
    ///
    /// In [`EditMode::Idle`] the draft is appended as a new record; in
    /// [`EditMode::Editing`] it overwrites the edited record in place. On
    /// success the draft and errors are cleared and the session returns to
    /// idle. On a validation failure the errors are kept for display and the
    /// edit mode is unchanged.
    pub fn submit(&mut self) -> Result<Notice, SessionError> {
        if self.is_loading() {
            return Err(SessionError::LoadInProgress);
        }
        let schema = self.schema.as_ref().ok_or(SessionError::NoActiveForm)?;

        let errors = validate(schema, &self.draft);
        if !errors.is_empty() {
            tracing::debug!(form_type = %schema.form_type(), missing = errors.len(), "submit rejected");
            self.errors = errors.clone();
            self.last_submission_succeeded = false;
            return Err(SessionError::Validation(errors));
        }

        let form_type = schema.form_type().clone();
        let now = Utc::now();
        let notice = match self.edit_mode {
            EditMode::Idle => {
                let id = self.store.append(schema, &self.draft, now);
                tracing::info!(form_type = %form_type, id = %id, "record added");
                Notice::Submitted { form_type, id }
            }
            EditMode::Editing(id) => {
                if self.store.replace(schema, id, &self.draft, now).is_none() {
                    tracing::warn!(form_type = %form_type, id = %id, "edited record vanished");
                    self.edit_mode = EditMode::Idle;
                    return Err(SessionError::StaleRecord { form_type, id });
                }
                tracing::info!(form_type = %form_type, id = %id, "record updated");
                Notice::ChangesSaved { form_type, id }
            }
        };

        self.draft.clear();
        self.errors.clear();
        self.edit_mode = EditMode::Idle;
        self.last_submission_succeeded = true;
        Ok(notice)
    }

    /// Opens the record at `index` of `form_type` for editing.
    ///
    /// If that form type's schema is already active the draft is filled
    /// immediately and `None` is returned. Otherwise the schema is requested
    /// and the returned ticket must be fetched and applied; the draft is
    /// replaced when it lands and kept if the load fails.
    pub fn edit(
        &mut self,
        form_type: FormType,
        index: usize,
    ) -> Result<Option<LoadTicket>, SessionError> {
        let record = self
            .store
            .get(&form_type, index)
            .ok_or_else(|| SessionError::RecordNotFound {
                form_type: form_type.clone(),
                index,
            })?;
        let id = record.id();
        let values = record.to_draft();

        self.errors.clear();
        self.edit_mode = EditMode::Editing(id);
        tracing::info!(form_type = %form_type, id = %id, index, "editing record");

        let schema_ready = !self.is_loading()
            && self
                .schema
                .as_ref()
                .is_some_and(|s| *s.form_type() == form_type);
        if schema_ready {
            self.pending_edit = None;
            self.draft = values;
            Ok(None)
        } else {
            let ticket = self.begin_load(form_type);
            self.pending_edit = Some(id);
            Ok(Some(ticket))
        }
    }

    /// Leaves edit mode without saving, discarding the draft.
    pub fn cancel_edit(&mut self) -> Option<Notice> {
        let EditMode::Editing(id) = self.edit_mode else {
            return None;
        };
        tracing::info!(id = %id, "edit cancelled");
        self.abandon_edit();
        self.draft.clear();
        self.errors.clear();
        let form_type = self.active_form_type.clone()?;
        Some(Notice::EditCancelled { form_type })
    }

    /// Removes the record at `index` of `form_type`.
    ///
    /// Edits are bound to record ids, so removing a different record never
    /// retargets an edit in progress. Removing the record being edited
    /// cancels the edit and clears the draft.
    pub fn delete(&mut self, form_type: FormType, index: usize) -> Result<Notice, SessionError> {
        let removed =
            self.store
                .remove(&form_type, index)
                .ok_or_else(|| SessionError::RecordNotFound {
                    form_type: form_type.clone(),
                    index,
                })?;

        let edit_cancelled = self.edit_mode == EditMode::Editing(removed.id());
        if edit_cancelled {
            self.abandon_edit();
            self.draft.clear();
            self.errors.clear();
        }
        tracing::info!(form_type = %form_type, id = %removed.id(), index, edit_cancelled, "record deleted");
        Ok(Notice::Deleted {
            form_type,
            edit_cancelled,
        })
    }

    fn abandon_edit(&mut self) {
        self.edit_mode = EditMode::Idle;
        self.pending_edit = None;
    }

    // --- Read-only state ---

    /// The form type currently selected (possibly still loading).
    pub fn active_form_type(&self) -> Option<&FormType> {
        self.active_form_type.as_ref()
    }

    /// The schema currently rendered.
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Returns the draft value for `name`, or `""` if unset.
    pub fn value(&self, name: &str) -> &str {
        self.draft.get(name).map_or("", String::as_str)
    }

    /// Errors from the most recent submit attempt.
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Percentage of the active schema's required fields that are filled.
    pub fn progress(&self) -> u8 {
        self.schema
            .as_ref()
            .map_or(0, |schema| compute_progress(schema, &self.draft))
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_some()
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Current position of the record being edited within the active form
    /// type's collection.
    pub fn editing_index(&self) -> Option<usize> {
        let EditMode::Editing(id) = self.edit_mode else {
            return None;
        };
        self.store.position(self.active_form_type.as_ref()?, id)
    }

    pub fn last_submission_succeeded(&self) -> bool {
        self.last_submission_succeeded
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Shorthand for the records of one form type.
    pub fn records(&self, form_type: &FormType) -> &[Record] {
        self.store.records(form_type)
    }
}
