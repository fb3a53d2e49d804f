use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use super::schema::Schema;

/// In-progress values for the active schema, keyed by field name.
pub type Draft = HashMap<String, String>;

/// Stable identity of a submitted record.
///
/// Assigned once at creation and never reused within a session, so an edit
/// stays bound to its record even when earlier rows are deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A committed set of values created from a [`Draft`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    values: IndexMap<String, String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Captures `draft` under `schema`: one value per schema field, in schema
    /// order. Fields absent from the draft are stored as empty strings; values
    /// are kept verbatim.
    pub fn capture(id: RecordId, schema: &Schema, draft: &Draft, at: DateTime<Utc>) -> Self {
        Self {
            id,
            values: fill(schema, draft),
            created_at: at,
            updated_at: None,
        }
    }

    /// Replaces every value with a fresh capture of `draft`, keeping the id.
    pub(crate) fn overwrite(&mut self, schema: &Schema, draft: &Draft, at: DateTime<Utc>) {
        self.values = fill(schema, draft);
        self.updated_at = Some(at);
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the value stored for `name`, or `""` if the field is unknown.
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Iterates over `(field name, value)` pairs in schema order.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the field names in schema order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Copies the values back into a draft for editing.
    pub fn to_draft(&self) -> Draft {
        self.values
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last saved through an edit, if ever.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

fn fill(schema: &Schema, draft: &Draft) -> IndexMap<String, String> {
    schema
        .fields()
        .iter()
        .map(|field| {
            let value = draft.get(&field.name).cloned().unwrap_or_default();
            (field.name.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::{FieldDescriptor, FieldKind};

    fn schema() -> Schema {
        Schema::new(
            "User Information".into(),
            vec![
                FieldDescriptor::new("firstName", "First Name", FieldKind::Text, true),
                FieldDescriptor::new("lastName", "Last Name", FieldKind::Text, true),
                FieldDescriptor::new("age", "Age", FieldKind::Number, false),
            ],
        )
        .unwrap()
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn capture_fills_missing_fields_in_schema_order() {
        let draft = Draft::from([
            ("lastName".to_string(), "Lee".to_string()),
            ("firstName".to_string(), "Ann".to_string()),
        ]);
        let record = Record::capture(RecordId::new(1), &schema(), &draft, at(9));
        let pairs: Vec<(&str, &str)> = record.values().collect();
        assert_eq!(
            pairs,
            vec![("firstName", "Ann"), ("lastName", "Lee"), ("age", "")]
        );
        assert_eq!(record.created_at(), at(9));
        assert_eq!(record.updated_at(), None);
    }

    #[test]
    fn capture_keeps_values_verbatim() {
        let draft = Draft::from([("firstName".to_string(), "  Ann ".to_string())]);
        let record = Record::capture(RecordId::new(1), &schema(), &draft, at(9));
        assert_eq!(record.value("firstName"), "  Ann ");
    }

    #[test]
    fn unknown_value_is_empty() {
        let record = Record::capture(RecordId::new(1), &schema(), &Draft::new(), at(9));
        assert_eq!(record.value("nope"), "");
    }

    #[test]
    fn to_draft_round_trips_every_field() {
        let draft = Draft::from([("firstName".to_string(), "Ann".to_string())]);
        let record = Record::capture(RecordId::new(1), &schema(), &draft, at(9));
        let rehydrated = record.to_draft();
        assert_eq!(rehydrated.len(), 3);
        assert_eq!(rehydrated["firstName"], "Ann");
        assert_eq!(rehydrated["age"], "");
    }

    #[test]
    fn overwrite_keeps_id_and_sets_updated_at() {
        let mut record = Record::capture(RecordId::new(7), &schema(), &Draft::new(), at(9));
        let draft = Draft::from([("age".to_string(), "40".to_string())]);
        record.overwrite(&schema(), &draft, at(10));
        assert_eq!(record.id(), RecordId::new(7));
        assert_eq!(record.value("age"), "40");
        assert_eq!(record.created_at(), at(9));
        assert_eq!(record.updated_at(), Some(at(10)));
    }

    #[test]
    fn record_id_display() {
        assert_eq!(RecordId::new(3).to_string(), "#3");
        assert_eq!(RecordId::new(3).get(), 3);
    }
}
