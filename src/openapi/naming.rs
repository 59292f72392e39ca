//! Derived identifiers
//!
//! Schema names are table names with everything outside `[A-Za-z0-9]`
//! removed. That derivation is lossy, so [`SchemaNames::assign`] resolves
//! the names for a whole base up front according to a [`CollisionPolicy`].

use crate::base::schema::Base;
use crate::error::{GeneratorError, Result};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Stem used when a table name contains no ASCII alphanumerics
pub const EMPTY_NAME_STEM: &str = "Table";

/// Placeholder schema name for links whose target table is not in the base
pub const UNKNOWN_TABLE_NAME: &str = "UnknownTable";

/// Characters `encodeURIComponent` leaves alone: alphanumerics and `-_.!~*'()`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// What to do when two tables derive the same schema name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Append `2`, `3`, ... to later tables
    #[default]
    Suffix,
    /// Abort with [`GeneratorError::SchemaNameCollision`]
    Fail,
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suffix => write!(f, "suffix"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

impl std::str::FromStr for CollisionPolicy {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suffix" => Ok(Self::Suffix),
            "fail" => Ok(Self::Fail),
            other => Err(GeneratorError::Config(format!(
                "unknown collision policy '{}' (expected 'suffix' or 'fail')",
                other
            ))),
        }
    }
}

/// Strip every character outside `[A-Za-z0-9]`
pub fn derive_schema_name(table_name: &str) -> String {
    table_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Component name of the list response wrapping `schema_name`
pub fn list_response_name(schema_name: &str) -> String {
    format!("List{}Response", schema_name)
}

/// `operationId` of the list endpoint for `schema_name`
pub fn operation_id(schema_name: &str) -> String {
    format!("list{}", schema_name)
}

/// Percent-encode a single path segment the way `encodeURIComponent` does
pub fn encode_uri_component(segment: &str) -> String {
    utf8_percent_encode(segment, URI_COMPONENT).to_string()
}

/// URL path of a table's list endpoint
///
/// The table segment is percent-encoded; the base id is used verbatim.
pub fn table_path(base_id: &str, table_segment: &str) -> String {
    format!("/{}/{}", base_id, encode_uri_component(table_segment))
}

/// A table whose schema name had to be changed to stay unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRename {
    /// Table name as given
    pub table_name: String,
    /// Name the table would have had
    pub derived: String,
    /// Name it was given instead
    pub assigned: String,
}

/// Schema names resolved for every table of a base
#[derive(Debug, Clone, Default)]
pub struct SchemaNames {
    /// (table id, schema name) in table order
    names: Vec<(String, String)>,
    /// Tables that were renamed under [`CollisionPolicy::Suffix`]
    renames: Vec<SchemaRename>,
}

impl SchemaNames {
    /// Resolve unique schema names for all tables of `base`
    ///
    /// A candidate is free only when both it and its list response name
    /// are unused, so a table literally named `ListFooResponse` cannot
    /// clobber the wrapper of a table named `Foo`.
    pub fn assign(base: &Base, policy: CollisionPolicy) -> Result<Self> {
        // component key -> owning table name
        let mut taken: HashMap<String, String> = HashMap::new();
        let mut names = Vec::with_capacity(base.tables.len());
        let mut renames = Vec::new();

        for table in &base.tables {
            let mut derived = derive_schema_name(&table.name);
            if derived.is_empty() {
                derived = EMPTY_NAME_STEM.to_string();
            }

            let is_free = |candidate: &str, taken: &HashMap<String, String>| {
                !taken.contains_key(candidate)
                    && !taken.contains_key(&list_response_name(candidate))
            };

            let assigned = if is_free(&derived, &taken) {
                derived.clone()
            } else {
                match policy {
                    CollisionPolicy::Fail => {
                        let first = taken
                            .get(&derived)
                            .or_else(|| taken.get(&list_response_name(&derived)))
                            .cloned()
                            .unwrap_or_default();
                        return Err(GeneratorError::SchemaNameCollision {
                            schema_name: derived,
                            first,
                            second: table.name.clone(),
                        });
                    }
                    CollisionPolicy::Suffix => {
                        let mut n = 2;
                        let mut candidate = format!("{}{}", derived, n);
                        while !is_free(&candidate, &taken) {
                            n += 1;
                            candidate = format!("{}{}", derived, n);
                        }
                        renames.push(SchemaRename {
                            table_name: table.name.clone(),
                            derived: derived.clone(),
                            assigned: candidate.clone(),
                        });
                        candidate
                    }
                }
            };

            taken.insert(assigned.clone(), table.name.clone());
            taken.insert(list_response_name(&assigned), table.name.clone());
            names.push((table.id.clone(), assigned));
        }

        Ok(Self { names, renames })
    }

    /// Schema name of the table at `index` in base order
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(|(_, name)| name.as_str())
    }

    /// Schema name of the first table with id `table_id`
    pub fn by_table_id(&self, table_id: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|(id, _)| id == table_id)
            .map(|(_, name)| name.as_str())
    }

    /// Tables that were renamed to stay unique
    pub fn renames(&self) -> &[SchemaRename] {
        &self.renames
    }
}
