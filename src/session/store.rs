use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::model::{Draft, FormType, Record, RecordId, Schema};

/// Submitted records, one ordered collection per form type.
///
/// Positions are for display and handler input; [`RecordId`]s are the stable
/// identity. Collections appear in the order their first record was added.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    collections: IndexMap<FormType, Vec<Record>>,
    next_id: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records for `form_type`, oldest first.
    pub fn records(&self, form_type: &FormType) -> &[Record] {
        self.collections
            .get(form_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the record at `index` in `form_type`'s collection.
    pub fn get(&self, form_type: &FormType, index: usize) -> Option<&Record> {
        self.records(form_type).get(index)
    }

    /// Returns the record with `id` in `form_type`'s collection.
    pub fn find(&self, form_type: &FormType, id: RecordId) -> Option<&Record> {
        self.records(form_type).iter().find(|r| r.id() == id)
    }

    /// Returns the current position of `id` in `form_type`'s collection.
    pub fn position(&self, form_type: &FormType, id: RecordId) -> Option<usize> {
        self.records(form_type).iter().position(|r| r.id() == id)
    }

    /// Appends `draft` as a new record in the collection for `schema`'s form type.
    pub fn append(&mut self, schema: &Schema, draft: &Draft, at: DateTime<Utc>) -> RecordId {
        self.next_id += 1;
        let id = RecordId::new(self.next_id);
        self.collections
            .entry(schema.form_type().clone())
            .or_default()
            .push(Record::capture(id, schema, draft, at));
        id
    }

    /// Overwrites the record with `id` in place, returning its position.
    ///
    /// Returns `None` if no such record exists.
    pub fn replace(
        &mut self,
        schema: &Schema,
        id: RecordId,
        draft: &Draft,
        at: DateTime<Utc>,
    ) -> Option<usize> {
        let records = self.collections.get_mut(schema.form_type())?;
        let index = records.iter().position(|r| r.id() == id)?;
        records[index].overwrite(schema, draft, at);
        Some(index)
    }

    /// Removes the record at `index`; later records shift down by one.
    pub fn remove(&mut self, form_type: &FormType, index: usize) -> Option<Record> {
        let records = self.collections.get_mut(form_type)?;
        (index < records.len()).then(|| records.remove(index))
    }

    /// Returns the number of records stored for `form_type`.
    pub fn len(&self, form_type: &FormType) -> usize {
        self.records(form_type).len()
    }

    /// Returns `true` if no form type has any records.
    pub fn is_empty(&self) -> bool {
        self.collections.values().all(Vec::is_empty)
    }

    /// Iterates over the non-empty collections.
    pub fn iter(&self) -> impl Iterator<Item = (&FormType, &[Record])> {
        self.collections
            .iter()
            .filter(|(_, records)| !records.is_empty())
            .map(|(form_type, records)| (form_type, records.as_slice()))
    }
}
