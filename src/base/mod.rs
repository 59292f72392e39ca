//! Base module
//!
//! This module provides the base description model and the sources
//! that load it (local JSON files and the Airtable metadata API).

pub mod schema;
pub mod source;

// Re-exports
pub use schema::{Base, BaseOverrides, Choice, Field, FieldOptions, Table};
pub use source::{BaseSource, FileSource, MetaApiSource};
