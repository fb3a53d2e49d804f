//! TUI screen implementations.

pub mod form_entry;
pub mod help;
pub mod records;

pub use form_entry::{FormEntryState, draw_form_entry};
pub use help::{HelpState, draw_help};
pub use records::{RecordsState, draw_records};
