use indexmap::IndexMap;

use super::record::Draft;
use super::schema::Schema;

/// Field-level messages keyed by field name, in schema order.
pub type ValidationErrors = IndexMap<String, String>;

/// Returns `true` if `name` holds a value that is non-empty after trimming.
fn is_filled(draft: &Draft, name: &str) -> bool {
    draft.get(name).is_some_and(|v| !v.trim().is_empty())
}

/// Percentage of required fields in `schema` that hold a non-blank value.
///
/// Rounds half up. A schema without required fields reports `0`.
pub fn compute_progress(schema: &Schema, draft: &Draft) -> u8 {
    let (required, filled) = schema
        .required_fields()
        .fold((0_usize, 0_usize), |(required, filled), field| {
            (required + 1, filled + usize::from(is_filled(draft, &field.name)))
        });
    if required == 0 {
        return 0;
    }
    let percent = (filled * 200 + required) / (required * 2);
    u8::try_from(percent).unwrap_or(100)
}

/// Checks every required field for a blank value.
///
/// Produces exactly one `"<label> is required"` entry per blank required
/// field. Optional fields are never checked, whatever their kind.
pub fn validate(schema: &Schema, draft: &Draft) -> ValidationErrors {
    schema
        .required_fields()
        .filter(|field| !is_filled(draft, &field.name))
        .map(|field| (field.name.clone(), format!("{} is required", field.label)))
        .collect()
}
