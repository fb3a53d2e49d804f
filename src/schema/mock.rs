use std::time::Duration;

use futures::FutureExt;
use futures::future::BoxFuture;

use super::catalog::Catalog;
use super::error::SchemaLoadError;
use super::source::SchemaSource;
use crate::model::{FormType, Schema};

/// The catalog shipped with the binary: user, address and payment forms.
const BUILTIN_CATALOG: &str = include_str!("builtin.json");

/// Default artificial latency, standing in for a remote schema service.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

/// An in-memory schema source that answers after a fixed delay.
#[derive(Debug, Clone)]
pub struct MockSchemaSource {
    catalog: Catalog,
    latency: Duration,
}

impl MockSchemaSource {
    /// Serves `catalog`, sleeping `latency` before every answer.
    pub fn new(catalog: Catalog, latency: Duration) -> Self {
        Self { catalog, latency }
    }

    /// Serves the built-in catalog.
    pub fn builtin(latency: Duration) -> Result<Self, SchemaLoadError> {
        Ok(Self::new(Catalog::parse(BUILTIN_CATALOG)?, latency))
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl SchemaSource for MockSchemaSource {
    fn form_types(&self) -> Vec<FormType> {
        self.catalog.form_types()
    }

    fn fetch_schema<'a>(
        &'a self,
        form_type: &'a FormType,
    ) -> BoxFuture<'a, Result<Schema, SchemaLoadError>> {
        async move {
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.catalog.schema(form_type)
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldKind;

    fn source() -> MockSchemaSource {
        MockSchemaSource::builtin(Duration::ZERO).unwrap()
    }

    #[test]
    fn builtin_has_three_form_types_in_order() {
        let names: Vec<String> = source()
            .form_types()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(
            names,
            vec![
                "User Information",
                "Address Information",
                "Payment Information"
            ]
        );
    }

    #[test]
    fn latency_is_kept() {
        let source = MockSchemaSource::builtin(DEFAULT_LATENCY).unwrap();
        assert_eq!(source.latency(), Duration::from_millis(500));
    }

    #[tokio::test]
    async fn user_information_schema() {
        let schema = source()
            .fetch_schema(&"User Information".into())
            .await
            .unwrap();
        let summary: Vec<(&str, bool)> = schema
            .fields()
            .iter()
            .map(|f| (f.name.as_str(), f.required))
            .collect();
        assert_eq!(
            summary,
            vec![("firstName", true), ("lastName", true), ("age", false)]
        );
        assert_eq!(schema.fields()[2].kind, FieldKind::Number);
    }

    #[tokio::test]
    async fn address_state_is_a_dropdown() {
        let schema = source()
            .fetch_schema(&"Address Information".into())
            .await
            .unwrap();
        let state = schema.field("state").unwrap();
        assert_eq!(state.kind.options(), ["California", "Texas", "New York"]);
        assert!(state.required);
        assert!(!schema.field("city").unwrap().required);
    }

    #[tokio::test]
    async fn payment_fields_are_all_required() {
        let schema = source()
            .fetch_schema(&"Payment Information".into())
            .await
            .unwrap();
        assert_eq!(schema.required_fields().count(), 4);
        assert_eq!(schema.field("cvv").unwrap().kind, FieldKind::Password);
        assert_eq!(schema.field("expiryDate").unwrap().kind, FieldKind::Date);
    }

    #[tokio::test]
    async fn unknown_form_type_fails_explicitly() {
        let err = source()
            .fetch_schema(&"Shipping Information".into())
            .await
            .unwrap_err();
        assert!(matches!(err, SchemaLoadError::NotFound(_)));
    }
}
