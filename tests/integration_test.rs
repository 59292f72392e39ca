//! Integration test for airtable-openapi
//!
//! Tests the end-to-end translation of base descriptions into OpenAPI documents.

use airtable_openapi::base::schema::{Base, BaseOverrides, Field, Table};
use airtable_openapi::base::source::{BaseSource, FileSource};
use airtable_openapi::openapi::naming::CollisionPolicy;
use airtable_openapi::openapi::type_mapping;
use airtable_openapi::openapi::{translate_base, DocumentOptions, Translator, Warnings};
use airtable_openapi::report;
use serde_json::json;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tasks_base() -> Base {
    Base::new("appX", "Demo").with_table(
        Table::new("tbl1", "Tasks")
            .with_field(Field::new("Title", "singleLineText"))
            .with_field(Field::new("Done", "checkbox")),
    )
}

#[test]
fn test_tasks_scenario() {
    let translation = translate_base(&tasks_base(), &DocumentOptions::default()).unwrap();
    let doc = serde_json::to_value(&translation.document).unwrap();

    assert_eq!(doc["paths"]["/appX/Tasks"]["get"]["operationId"], "listTasks");
    assert_eq!(doc["paths"]["/appX/Tasks"]["get"]["tags"], json!(["Tasks"]));
    assert_eq!(
        doc["components"]["schemas"]["Tasks"],
        json!({
            "type": "object",
            "properties": {
                "Title": {"type": "string"},
                "Done": {"type": "boolean"}
            }
        })
    );
    assert_eq!(
        doc["components"]["schemas"]["ListTasksResponse"]["properties"]["records"]["items"]
            ["properties"]["fields"],
        json!({"$ref": "#/components/schemas/Tasks"})
    );
    assert_eq!(
        doc["paths"]["/appX/Tasks"]["get"]["responses"]["200"]["content"]["application/json"]
            ["schema"]["$ref"],
        "#/components/schemas/ListTasksResponse"
    );
    assert!(translation.warnings.is_empty());
}

#[test]
fn test_unknown_type_reported_once() {
    let base = Base::new("appX", "Demo")
        .with_table(
            Table::new("tbl1", "Tasks")
                .with_field(Field::new("A", "unknownFutureType"))
                .with_field(Field::new("B", "unknownFutureType")),
        )
        .with_table(Table::new("tbl2", "Notes").with_field(Field::new("C", "unknownFutureType")));

    let translation = translate_base(&base, &DocumentOptions::default()).unwrap();
    let doc = serde_json::to_value(&translation.document).unwrap();

    assert_eq!(
        doc["components"]["schemas"]["Tasks"]["properties"]["A"],
        json!({"type": "string", "description": "Unmapped Airtable type: unknownFutureType"})
    );
    assert_eq!(translation.warnings.unmapped_types.len(), 1);

    let notice = report::render_warnings(&translation.warnings).unwrap();
    assert_eq!(notice.matches("unknownFutureType").count(), 1);
}

#[test]
fn test_determinism() {
    let base = tasks_base();
    let first = translate_base(&base, &DocumentOptions::default()).unwrap();
    let second = translate_base(&base, &DocumentOptions::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.document.to_json_string(true).unwrap(),
        second.document.to_json_string(true).unwrap()
    );
}

#[test]
fn test_completeness() {
    let base = Base::new("appX", "Demo")
        .with_table(Table::new("tbl1", "Tasks"))
        .with_table(Table::new("tbl2", "Team Members"))
        .with_table(Table::new("tbl3", "Notes & Ideas"));

    let translation = translate_base(&base, &DocumentOptions::default()).unwrap();
    let doc = &translation.document;

    assert_eq!(doc.paths.len(), 3);
    assert_eq!(doc.components.schemas.len(), 6);
    for name in ["Tasks", "TeamMembers", "NotesIdeas"] {
        assert!(doc.schema(name).is_some(), "missing {name}");
        assert!(doc.schema(&format!("List{name}Response")).is_some());
    }
    assert!(doc.paths.contains_key("/appX/Notes%20%26%20Ideas"));

    let keys: Vec<&str> = doc.components.schemas.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "Tasks",
            "ListTasksResponse",
            "TeamMembers",
            "ListTeamMembersResponse",
            "NotesIdeas",
            "ListNotesIdeasResponse"
        ]
    );
}

#[test]
fn test_type_mapping_totality() {
    let base = Base::new("appX", "Demo");
    let translator = Translator::new(&base, CollisionPolicy::Suffix).unwrap();
    let table = Table::new("tbl1", "Everything");

    for field_type in type_mapping::known_field_types() {
        let mut warnings = Warnings::default();
        let field = Field::new("f", field_type).with_description("described");
        let schema = translator.translate_field(&table, &field, &mut warnings);
        let expected = type_mapping::mapped_schema(field_type).unwrap();

        assert_eq!(schema.schema_type, expected.schema_type, "{field_type}");
        assert_eq!(schema.format, expected.format, "{field_type}");
        assert_eq!(schema.items, expected.items, "{field_type}");
        assert_eq!(schema.properties, expected.properties, "{field_type}");
        assert_eq!(schema.description.as_deref(), Some("described"));
        assert!(warnings.is_empty());
    }
}

#[test]
fn test_fallback_safety() {
    let base = Base::new("appX", "Demo");
    let translator = Translator::new(&base, CollisionPolicy::Suffix).unwrap();
    let table = Table::new("tbl1", "T");
    let mut warnings = Warnings::default();

    for field in [
        Field::untyped("none"),
        Field::new("empty", ""),
        Field::new("weird", "💥"),
        Field::new("future", "aiText"),
    ] {
        let schema = translator.translate_field(&table, &field, &mut warnings);
        assert_eq!(schema.schema_type.as_deref(), Some("string"));
        assert!(schema.description.is_some());
    }
    assert_eq!(warnings.missing_types.len(), 1);
    assert_eq!(warnings.unmapped_types.len(), 3);
}

#[tokio::test]
async fn test_fixture_end_to_end() {
    let source = FileSource::new(fixture("project_tracker.json"), BaseOverrides::default());
    let base = source.load().await.unwrap();
    let translation = translate_base(&base, &DocumentOptions::default()).unwrap();
    let doc = serde_json::to_value(&translation.document).unwrap();

    assert_eq!(doc["info"]["title"], "Project Tracker API (Read-Only)");

    let projects = &doc["components"]["schemas"]["Projects"]["properties"];
    assert_eq!(projects["Status"]["enum"], json!(["Planning", "Active", "Done"]));
    assert_eq!(projects["Budget"]["description"], "Approved budget in USD");
    assert_eq!(projects["Tasks"]["x-linkedTable"], "ProjectTasks");
    assert_eq!(projects["Owner"]["required"], json!(["id", "email"]));

    let tasks = &doc["components"]["schemas"]["ProjectTasks"]["properties"];
    assert_eq!(tasks["Project"]["x-linkedTable"], "Projects");
    assert_eq!(tasks["Labels"]["items"]["enum"], json!(["bug", "feature"]));
    assert_eq!(tasks["Archived In"]["x-linkedTable"], "UnknownTable");

    let op = &doc["paths"]["/appProjTracker01/Project%20Tasks"]["get"];
    assert_eq!(op["operationId"], "listProjectTasks");
    assert_eq!(
        doc["paths"]["/appProjTracker01/Projects"]["get"]["description"],
        "Active and archived projects"
    );

    let warnings = &translation.warnings;
    assert_eq!(warnings.unmapped_types.iter().collect::<Vec<_>>(), vec!["aiText"]);
    assert_eq!(warnings.dangling_links.len(), 1);
    assert_eq!(warnings.dangling_links[0].field, "Archived In");

    let summary = report::render_summary(&translation);
    assert!(summary.contains("ProjectTasks"));
}

#[tokio::test]
async fn test_fixture_output_is_stable() {
    let source = FileSource::new(fixture("project_tracker.json"), BaseOverrides::default());
    let first = source.load().await.unwrap();
    let second = source.load().await.unwrap();

    let a = report::render_markdown(&translate_base(&first, &DocumentOptions::default()).unwrap())
        .unwrap();
    let b = report::render_markdown(&translate_base(&second, &DocumentOptions::default()).unwrap())
        .unwrap();
    assert_eq!(a, b);
}
