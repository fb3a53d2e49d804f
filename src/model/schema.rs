use std::collections::HashSet;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use super::field::FieldDescriptor;

/// Errors raised while building a [`Schema`] or one of its fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate field name: {0}")]
    DuplicateField(String),
    #[error("dropdown field `{0}` has no options")]
    MissingOptions(String),
    #[error("field `{0}` is not a dropdown but lists options")]
    UnexpectedOptions(String),
}

/// Identifier of a form category, e.g. `"User Information"`.
///
/// Selects both the schema to load and the record collection to write to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct FormType(String);

impl FormType {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Ordered field descriptors belonging to exactly one form type.
///
/// Field names are unique; a schema is replaced wholesale on each load and
/// never merged with another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    form_type: FormType,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate field names.
    pub fn new(form_type: FormType, fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }
        Ok(Self { form_type, fields })
    }

    /// Returns the form type this schema was loaded for.
    pub fn form_type(&self) -> &FormType {
        &self.form_type
    }

    /// Returns the fields in display order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns `true` if the schema declares a field called `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Iterates over the required fields in display order.
    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.required)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
