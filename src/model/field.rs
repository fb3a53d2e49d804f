use serde::Deserialize;

use super::schema::SchemaError;

/// The kind of input control a field renders as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    /// A closed list of choices, in display order.
    Dropdown(Vec<String>),
    Date,
    Password,
}

impl FieldKind {
    /// Returns the wire name of this kind (the `type` key in a catalog).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Dropdown(_) => "dropdown",
            Self::Date => "date",
            Self::Password => "password",
        }
    }

    /// Returns the dropdown choices, or an empty slice for free-text kinds.
    pub fn options(&self) -> &[String] {
        match self {
            Self::Dropdown(options) => options,
            _ => &[],
        }
    }
}

/// Schema-level definition of one input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawField")]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor. Dropdown options travel inside `kind`.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawKind {
    Text,
    Number,
    Dropdown,
    Date,
    Password,
}

/// Catalog shape of a field: `options` sits beside `type` rather than inside it.
#[derive(Debug, Deserialize)]
struct RawField {
    name: String,
    #[serde(rename = "type")]
    kind: RawKind,
    label: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Option<Vec<String>>,
}

impl TryFrom<RawField> for FieldDescriptor {
    type Error = SchemaError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        let kind = match (raw.kind, raw.options) {
            (RawKind::Dropdown, Some(options)) if !options.is_empty() => {
                FieldKind::Dropdown(options)
            }
            (RawKind::Dropdown, _) => return Err(SchemaError::MissingOptions(raw.name)),
            (_, Some(_)) => return Err(SchemaError::UnexpectedOptions(raw.name)),
            (RawKind::Text, None) => FieldKind::Text,
            (RawKind::Number, None) => FieldKind::Number,
            (RawKind::Date, None) => FieldKind::Date,
            (RawKind::Password, None) => FieldKind::Password,
        };
        Ok(Self {
            name: raw.name,
            label: raw.label,
            kind,
            required: raw.required,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<FieldDescriptor, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn parses_text_field() {
        let field =
            parse(r#"{"name":"firstName","type":"text","label":"First Name","required":true}"#)
                .unwrap();
        assert_eq!(
            field,
            FieldDescriptor::new("firstName", "First Name", FieldKind::Text, true)
        );
    }

    #[test]
    fn required_defaults_to_false() {
        let field = parse(r#"{"name":"age","type":"number","label":"Age"}"#).unwrap();
        assert!(!field.required);
        assert_eq!(field.kind, FieldKind::Number);
    }

    #[test]
    fn parses_dropdown_with_options() {
        let field = parse(
            r#"{"name":"state","type":"dropdown","label":"State","options":["Texas","Ohio"],"required":true}"#,
        )
        .unwrap();
        assert_eq!(field.kind.options(), ["Texas", "Ohio"]);
        assert_eq!(field.kind.as_str(), "dropdown");
    }

    #[test]
    fn dropdown_without_options_is_rejected() {
        let err = parse(r#"{"name":"state","type":"dropdown","label":"State"}"#).unwrap_err();
        assert!(err.to_string().contains("state"), "{err}");
    }

    #[test]
    fn dropdown_with_empty_options_is_rejected() {
        let err = parse(r#"{"name":"state","type":"dropdown","label":"State","options":[]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("has no options"), "{err}");
    }

    #[test]
    fn options_on_text_field_are_rejected() {
        let err = parse(r#"{"name":"city","type":"text","label":"City","options":["A"]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("city"), "{err}");
    }

    #[test]
    fn unknown_type_is_rejected() {
        assert!(parse(r#"{"name":"x","type":"checkbox","label":"X"}"#).is_err());
    }

    #[test]
    fn free_text_kinds_have_no_options() {
        for kind in [
            FieldKind::Text,
            FieldKind::Number,
            FieldKind::Date,
            FieldKind::Password,
        ] {
            assert!(kind.options().is_empty(), "{kind:?}");
        }
    }
}
