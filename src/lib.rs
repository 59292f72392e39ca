//! airtable-openapi Library
//!
//! Translates an Airtable base description into a read-only OpenAPI 3.1
//! document. The main binary is in src/main.rs.

pub mod base;
pub mod cli;
pub mod config;
pub mod error;
pub mod openapi;
pub mod report;

pub use base::Base;
pub use error::{GeneratorError, Result};
pub use openapi::{translate_base, DocumentOptions, Translation};
