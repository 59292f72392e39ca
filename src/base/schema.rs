//! Base data structures
//!
//! This module defines the core data structures for representing an
//! Airtable base description: the base itself, its tables, their fields
//! and the type-specific field options.

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field type tag for linked record fields
pub const LINKED_RECORDS_TYPE: &str = "multipleRecordLinks";

/// Field type tag for single select fields
pub const SINGLE_SELECT_TYPE: &str = "singleSelect";

/// Field type tag for multiple select fields
pub const MULTIPLE_SELECTS_TYPE: &str = "multipleSelects";

/// A select choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Choice identifier (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Choice label
    pub name: String,
    /// Display colour (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Choice {
    /// Create a choice with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
        }
    }
}

/// Type-specific field metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOptions {
    /// Choices for select fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<Choice>>,
    /// Target table for linked record fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_table_id: Option<String>,
}

/// A named, typed column within a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field identifier (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Field name
    pub name: String,
    /// Field type tag (e.g. "singleLineText")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    /// Field description (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Type-specific options (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<FieldOptions>,
}

impl Field {
    /// Create a new field
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            field_type: Some(field_type.into()),
            description: None,
            options: None,
        }
    }

    /// Create a field whose type is unknown
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            field_type: None,
            description: None,
            options: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the select choices
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = self.options.get_or_insert_with(FieldOptions::default);
        options.choices = Some(choices.into_iter().map(Choice::new).collect());
        self
    }

    /// Set the linked table
    pub fn with_linked_table(mut self, table_id: impl Into<String>) -> Self {
        let options = self.options.get_or_insert_with(FieldOptions::default);
        options.linked_table_id = Some(table_id.into());
        self
    }

    /// Non-empty description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Select choices, if any were supplied and the list is non-empty
    pub fn choices(&self) -> Option<&[Choice]> {
        self.options
            .as_ref()
            .and_then(|o| o.choices.as_deref())
            .filter(|c| !c.is_empty())
    }

    /// Linked table identifier, if any
    pub fn linked_table_id(&self) -> Option<&str> {
        self.options.as_ref().and_then(|o| o.linked_table_id.as_deref())
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}",
            self.name,
            self.field_type.as_deref().unwrap_or("<untyped>")
        )?;
        if let Some(target) = self.linked_table_id() {
            write!(f, " -> {}", target)?;
        }
        if let Some(choices) = self.choices() {
            let names: Vec<&str> = choices.iter().map(|c| c.name.as_str()).collect();
            write!(f, " [{}]", names.join(", "))?;
        }
        Ok(())
    }
}

/// A named collection of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Table identifier
    pub id: String,
    /// Table name
    pub name: String,
    /// Table description (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Fields in display order
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Table {
    /// Create a new table
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Add a field to the table
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Builder-style variant of [`Table::add_field`]
    pub fn with_field(mut self, field: Field) -> Self {
        self.add_field(field);
        self
    }

    /// Get a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Non-empty description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table: {} ({})", self.name, self.id)?;
        if let Some(description) = self.description() {
            writeln!(f, "  -- {}", description)?;
        }
        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }
        Ok(())
    }
}

/// Overrides applied when parsing a base description
#[derive(Debug, Clone, Default)]
pub struct BaseOverrides {
    /// Base identifier to use instead of (or in absence of) the document's
    pub id: Option<String>,
    /// Base name to use instead of (or in absence of) the document's
    pub name: Option<String>,
}

/// Raw input shape: either a full base or a metadata API response
#[derive(Debug, Deserialize)]
struct RawBase {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    tables: Option<Vec<Table>>,
}

/// The top-level container of tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    /// Base identifier (e.g. "appXXXXXXXXXXXXXX")
    pub id: String,
    /// Base name
    pub name: String,
    /// Tables in display order
    pub tables: Vec<Table>,
}

impl Base {
    /// Create a new, empty base
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tables: Vec::new(),
        }
    }

    /// Add a table to the base
    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// Builder-style variant of [`Base::add_table`]
    pub fn with_table(mut self, table: Table) -> Self {
        self.add_table(table);
        self
    }

    /// Parse a base description from JSON text
    ///
    /// Accepts either a full base object (`{id, name, tables}`) or the
    /// metadata API shape (`{tables}`). Overrides win over document values.
    /// A missing id (after overrides) or a missing `tables` array is
    /// reported as [`GeneratorError::MissingBase`]; a missing name falls
    /// back to the id.
    pub fn from_json_str(text: &str, overrides: &BaseOverrides) -> Result<Self> {
        let raw: RawBase = serde_json::from_str(text)?;

        let tables = raw
            .tables
            .ok_or_else(|| GeneratorError::missing_base("input has no 'tables' array"))?;

        let id = overrides
            .id
            .clone()
            .or(raw.id)
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| {
                GeneratorError::missing_base("base id is required (pass --base-id)")
            })?;

        let name = overrides
            .name
            .clone()
            .or(raw.name)
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| id.clone());

        Ok(Self { id, name, tables })
    }

    /// Get a table by its identifier
    pub fn table_by_id(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    /// Total number of fields across all tables
    pub fn field_count(&self) -> usize {
        self.tables.iter().map(|t| t.fields.len()).sum()
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Base: {} ({})", self.name, self.id)?;
        writeln!(
            f,
            "Contains {} tables and {} fields\n",
            self.tables.len(),
            self.field_count()
        )?;
        for table in &self.tables {
            writeln!(f, "{}", table)?;
        }
        Ok(())
    }
}
