//! Output rendering
//!
//! Turns a [`Translation`] into the text handed to the user: the JSON
//! document, the warning notice, the Markdown notice and a summary table.

use crate::error::Result;
use crate::openapi::translator::{Translation, Warnings};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use std::fmt::Write;

/// JSON text of the generated document
pub fn render_document(translation: &Translation, pretty: bool) -> Result<String> {
    translation.document.to_json_string(pretty)
}

/// Prose notice describing the warnings, or `None` when there are none
pub fn render_warnings(warnings: &Warnings) -> Option<String> {
    if warnings.is_empty() {
        return None;
    }

    let mut out = String::new();

    if !warnings.unmapped_types.is_empty() {
        out.push_str("## Warning: Unmapped Field Types\n");
        out.push_str("The following Airtable field types were not mapped to OpenAPI types:\n");
        for field_type in &warnings.unmapped_types {
            let _ = writeln!(out, "- {}", field_type);
        }
        out.push_str(
            "These fields have been set to type 'string' in the schema. \
             You may want to update their definitions manually.\n",
        );
    }

    if !warnings.missing_types.is_empty() {
        push_section_break(&mut out);
        out.push_str("## Warning: Fields Without a Type\n");
        for field in &warnings.missing_types {
            let _ = writeln!(out, "- {}.{}", field.table, field.field);
        }
        out.push_str("These fields have been set to type 'string' in the schema.\n");
    }

    if !warnings.dangling_links.is_empty() {
        push_section_break(&mut out);
        out.push_str("## Warning: Unresolved Linked Tables\n");
        for link in &warnings.dangling_links {
            let target = link.linked_table_id.as_deref().unwrap_or("no linked table id");
            let _ = writeln!(out, "- {}.{} ({})", link.table, link.field, target);
        }
        out.push_str("These links point at 'UnknownTable' in the schema.\n");
    }

    if !warnings.renamed_schemas.is_empty() {
        push_section_break(&mut out);
        out.push_str("## Warning: Renamed Schemas\n");
        for rename in &warnings.renamed_schemas {
            let _ = writeln!(
                out,
                "- '{}' would map to '{}' which is already used; named '{}' instead",
                rename.table_name, rename.derived, rename.assigned
            );
        }
    }

    Some(out)
}

fn push_section_break(out: &mut String) {
    if !out.is_empty() {
        out.push('\n');
    }
}

/// Full Markdown notice: heading, paste instructions, fenced JSON, warnings
pub fn render_markdown(translation: &Translation) -> Result<String> {
    let mut out = String::new();
    out.push_str("# OpenAPI Schema (Read-Only)\n\n");
    out.push_str(
        "Copy the following JSON and paste it into the **Schema** input field of your custom GPT:\n\n",
    );
    out.push_str("```json\n");
    out.push_str(&render_document(translation, true)?);
    out.push_str("\n```\n");

    if let Some(warnings) = render_warnings(&translation.warnings) {
        out.push('\n');
        out.push_str(&warnings);
    }

    Ok(out)
}

/// Table of every generated endpoint
pub fn render_summary(translation: &Translation) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Table", "Schema", "Path", "Fields"]);

    for endpoint in &translation.endpoints {
        table.add_row(vec![
            Cell::new(&endpoint.table_name),
            Cell::new(&endpoint.schema_name),
            Cell::new(&endpoint.path),
            Cell::new(endpoint.field_count),
        ]);
    }

    format!(
        "{}\n{} endpoints, {} warnings",
        table,
        translation.endpoints.len(),
        translation.warnings.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::schema::{Base, Field, Table as BaseTable};
    use crate::openapi::translator::{translate_base, DocumentOptions};

    fn translation_with_warnings() -> Translation {
        let base = Base::new("appX", "Demo").with_table(
            BaseTable::new("tbl1", "Tasks")
                .with_field(Field::new("Title", "singleLineText"))
                .with_field(Field::new("A", "unknownFutureType"))
                .with_field(Field::new("B", "unknownFutureType"))
                .with_field(Field::new("Ghost", "multipleRecordLinks").with_linked_table("tblGone")),
        );
        translate_base(&base, &DocumentOptions::default()).unwrap()
    }

    #[test]
    fn test_no_warnings_no_notice() {
        assert!(render_warnings(&Warnings::default()).is_none());
    }

    #[test]
    fn test_warning_notice() {
        let translation = translation_with_warnings();
        let notice = render_warnings(&translation.warnings).unwrap();
        assert!(notice.starts_with("## Warning: Unmapped Field Types\n"));
        assert_eq!(notice.matches("- unknownFutureType").count(), 1);
        assert!(notice.contains("## Warning: Unresolved Linked Tables"));
        assert!(notice.contains("- Tasks.Ghost (tblGone)"));
        assert!(!notice.contains("Renamed Schemas"));
    }

    #[test]
    fn test_markdown() {
        let translation = translation_with_warnings();
        let markdown = render_markdown(&translation).unwrap();
        assert!(markdown.starts_with("# OpenAPI Schema (Read-Only)"));
        assert!(markdown.contains("```json\n{\n  \"openapi\": \"3.1.0\""));
        assert!(markdown.contains("## Warning: Unmapped Field Types"));
    }

    #[test]
    fn test_document_compact_and_pretty() {
        let translation = translation_with_warnings();
        let compact = render_document(&translation, false).unwrap();
        let pretty = render_document(&translation, true).unwrap();
        assert!(!compact.contains('\n'));
        assert!(pretty.contains("\n  \"info\""));
        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary() {
        let translation = translation_with_warnings();
        let summary = render_summary(&translation);
        assert!(summary.contains("/appX/Tasks"));
        assert!(summary.contains("1 endpoints, 2 warnings"));
    }
}
