//! Terminal dynamic-form renderer.
//!
//! A [`session::FormSession`] loads field schemas from a
//! [`schema::SchemaSource`], tracks the draft being filled in, validates
//! required fields, and keeps submitted records per form type. The [`tui`]
//! module renders that state and forwards user input to the session.

pub mod config;
pub mod model;
pub mod schema;
pub mod session;
pub mod tui;
