use std::path::{Path, PathBuf};

use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;

use super::error::SchemaLoadError;
use super::source::SchemaSource;
use crate::model::{FieldDescriptor, FormType, Schema};

/// On-disk shape of a catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    forms: Vec<CatalogForm>,
}

#[derive(Debug, Deserialize)]
struct CatalogForm {
    name: FormType,
    fields: Vec<FieldDescriptor>,
}

/// A parsed set of schemas, one per form type, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    schemas: Vec<Schema>,
}

impl Catalog {
    /// Parses a JSON catalog: `{"forms": [{"name": ..., "fields": [...]}]}`.
    pub fn parse(json: &str) -> Result<Self, SchemaLoadError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let mut schemas: Vec<Schema> = Vec::with_capacity(file.forms.len());
        for form in file.forms {
            if schemas.iter().any(|s| *s.form_type() == form.name) {
                return Err(SchemaLoadError::DuplicateFormType(form.name));
            }
            schemas.push(Schema::new(form.name, form.fields)?);
        }
        Ok(Self { schemas })
    }

    /// Returns the form types in catalog order.
    pub fn form_types(&self) -> Vec<FormType> {
        self.schemas.iter().map(|s| s.form_type().clone()).collect()
    }

    /// Returns the schema for `form_type`, or [`SchemaLoadError::NotFound`].
    pub fn schema(&self, form_type: &FormType) -> Result<Schema, SchemaLoadError> {
        self.schemas
            .iter()
            .find(|s| s.form_type() == form_type)
            .cloned()
            .ok_or_else(|| SchemaLoadError::NotFound(form_type.clone()))
    }
}

/// Serves schemas from a JSON catalog file.
///
/// The file is re-read on every fetch so edits show up the next time a form
/// type is selected. The selector list is fixed when the source is opened.
#[derive(Debug, Clone)]
pub struct CatalogSchemaSource {
    path: PathBuf,
    form_types: Vec<FormType>,
}

impl CatalogSchemaSource {
    /// Opens and validates the catalog at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SchemaLoadError> {
        let path = path.into();
        let catalog = Catalog::parse(&std::fs::read_to_string(&path)?)?;
        Ok(Self {
            path,
            form_types: catalog.form_types(),
        })
    }

    /// Returns the catalog file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for CatalogSchemaSource {
    fn form_types(&self) -> Vec<FormType> {
        self.form_types.clone()
    }

    fn fetch_schema<'a>(
        &'a self,
        form_type: &'a FormType,
    ) -> BoxFuture<'a, Result<Schema, SchemaLoadError>> {
        async move {
            let json = tokio::fs::read_to_string(&self.path).await?;
            Catalog::parse(&json)?.schema(form_type)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::model::{FieldKind, SchemaError};

    const TWO_FORMS: &str = r#"{
        "forms": [
            {"name": "Pets", "fields": [
                {"name": "petName", "type": "text", "label": "Pet Name", "required": true},
                {"name": "species", "type": "dropdown", "label": "Species",
                 "options": ["Cat", "Dog"], "required": true}
            ]},
            {"name": "Notes", "fields": [
                {"name": "body", "type": "text", "label": "Body"}
            ]}
        ]
    }"#;

    fn write_catalog(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    mod parse {
        use super::*;

        #[test]
        fn keeps_catalog_order() {
            let catalog = Catalog::parse(TWO_FORMS).unwrap();
            assert_eq!(
                catalog.form_types(),
                vec![FormType::new("Pets"), FormType::new("Notes")]
            );
        }

        #[test]
        fn schema_lookup() {
            let catalog = Catalog::parse(TWO_FORMS).unwrap();
            let schema = catalog.schema(&"Pets".into()).unwrap();
            assert_eq!(schema.len(), 2);
            assert_eq!(
                schema.field("species").unwrap().kind,
                FieldKind::Dropdown(vec!["Cat".into(), "Dog".into()])
            );
        }

        #[test]
        fn unknown_form_type_is_not_found() {
            let catalog = Catalog::parse(TWO_FORMS).unwrap();
            let err = catalog.schema(&"Cars".into()).unwrap_err();
            assert!(matches!(err, SchemaLoadError::NotFound(ref t) if t.as_str() == "Cars"));
            assert_eq!(
                err.to_string(),
                "schema not found for form type \"Cars\""
            );
        }

        #[test]
        fn duplicate_form_type_is_rejected() {
            let json = r#"{"forms": [
                {"name": "A", "fields": []},
                {"name": "A", "fields": []}
            ]}"#;
            let err = Catalog::parse(json).unwrap_err();
            assert!(matches!(err, SchemaLoadError::DuplicateFormType(_)));
        }

        #[test]
        fn duplicate_field_is_rejected() {
            let json = r#"{"forms": [{"name": "A", "fields": [
                {"name": "x", "type": "text", "label": "X"},
                {"name": "x", "type": "text", "label": "X again"}
            ]}]}"#;
            let err = Catalog::parse(json).unwrap_err();
            assert!(matches!(
                err,
                SchemaLoadError::Invalid(SchemaError::DuplicateField(ref name)) if name == "x"
            ));
        }

        #[test]
        fn malformed_json_is_a_json_error() {
            let err = Catalog::parse("{not json").unwrap_err();
            assert!(matches!(err, SchemaLoadError::Json(_)));
        }
    }

    mod file_source {
        use super::*;

        #[test]
        fn open_reads_form_types() {
            let file = write_catalog(TWO_FORMS);
            let source = CatalogSchemaSource::open(file.path()).unwrap();
            assert_eq!(source.form_types().len(), 2);
            assert_eq!(source.path(), file.path());
        }

        #[test]
        fn open_missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = CatalogSchemaSource::open(dir.path().join("missing.json")).unwrap_err();
            assert!(matches!(err, SchemaLoadError::Io(_)));
        }

        #[tokio::test]
        async fn fetch_returns_schema() {
            let file = write_catalog(TWO_FORMS);
            let source = CatalogSchemaSource::open(file.path()).unwrap();
            let schema = source.fetch_schema(&"Notes".into()).await.unwrap();
            assert_eq!(schema.form_type().as_str(), "Notes");
            assert_eq!(schema.fields()[0].name, "body");
        }

        #[tokio::test]
        async fn fetch_picks_up_file_changes() {
            let file = write_catalog(TWO_FORMS);
            let source = CatalogSchemaSource::open(file.path()).unwrap();
            std::fs::write(
                file.path(),
                r#"{"forms": [{"name": "Notes", "fields": [
                    {"name": "title", "type": "text", "label": "Title", "required": true}
                ]}]}"#,
            )
            .unwrap();
            let schema = source.fetch_schema(&"Notes".into()).await.unwrap();
            assert_eq!(schema.fields()[0].name, "title");
        }

        #[tokio::test]
        async fn fetch_unknown_is_not_found() {
            let file = write_catalog(TWO_FORMS);
            let source = CatalogSchemaSource::open(file.path()).unwrap();
            let err = source.fetch_schema(&"Cars".into()).await.unwrap_err();
            assert!(matches!(err, SchemaLoadError::NotFound(_)));
        }
    }
}
