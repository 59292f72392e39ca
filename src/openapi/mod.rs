//! OpenAPI module
//!
//! This module provides the OpenAPI document model, the static Airtable
//! type mapping, derived identifiers and the translator that ties them
//! together.

pub mod document;
pub mod naming;
pub mod translator;
pub mod type_mapping;

// Re-exports
pub use document::{OpenApiDocument, Operation, Parameter, PathItem, Schema};
pub use naming::{derive_schema_name, CollisionPolicy, SchemaNames};
pub use translator::{
    translate_base, DocumentOptions, Endpoint, TableTranslation, Translation, Translator, Warnings,
};
