//! Airtable field type mapping
//!
//! A static, read-only table from Airtable field type tags to OpenAPI
//! schema fragments. Lookups hand out owned copies; the shared table is
//! never modified by per-field customization.

use crate::openapi::document::Schema;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// `{id, email, name}` object used by the collaborator-like types
fn collaborator() -> Schema {
    Schema::object([
        ("id", Schema::string()),
        ("email", Schema::string().with_format("email")),
        ("name", Schema::string()),
    ])
    .with_required(["id", "email"])
}

fn attachment() -> Schema {
    Schema::object([
        ("id", Schema::string()),
        ("url", Schema::string().with_format("uri")),
        ("filename", Schema::string()),
        ("size", Schema::integer()),
        ("type", Schema::string()),
    ])
}

fn date_time() -> Schema {
    Schema::string().with_format("date-time")
}

static TYPE_MAPPINGS: Lazy<IndexMap<&'static str, Schema>> = Lazy::new(|| {
    IndexMap::from([
        ("singleLineText", Schema::string()),
        ("email", Schema::string().with_format("email")),
        ("url", Schema::string().with_format("uri")),
        ("multilineText", Schema::string()),
        ("number", Schema::typed("number")),
        ("percent", Schema::typed("number").with_format("percent")),
        ("currency", Schema::typed("number").with_format("currency")),
        ("singleSelect", Schema::string()),
        ("multipleSelects", Schema::array(Schema::string())),
        ("singleCollaborator", collaborator()),
        ("multipleCollaborators", Schema::array(collaborator())),
        ("date", Schema::string().with_format("date")),
        ("dateTime", date_time()),
        ("phoneNumber", Schema::string()),
        ("multipleAttachments", Schema::array(attachment())),
        ("checkbox", Schema::typed("boolean")),
        ("formula", Schema::string()),
        ("createdTime", date_time()),
        ("rollup", Schema::string()),
        ("count", Schema::integer()),
        ("multipleLookupValues", Schema::array(Schema::string())),
        ("autoNumber", Schema::integer()),
        (
            "barcode",
            Schema::object([("text", Schema::string()), ("type", Schema::string())]),
        ),
        ("rating", Schema::integer()),
        ("richText", Schema::string()),
        ("duration", Schema::integer()),
        ("lastModifiedTime", date_time()),
        (
            "button",
            Schema::object([
                ("label", Schema::string()),
                ("url", Schema::string().with_format("uri")),
            ]),
        ),
        ("lastModifiedBy", collaborator()),
        ("createdBy", collaborator()),
    ])
});

/// Schema fragment for a field type tag, as an owned copy
pub fn mapped_schema(field_type: &str) -> Option<Schema> {
    TYPE_MAPPINGS.get(field_type).cloned()
}

/// Whether the tag has a static mapping
pub fn is_mapped(field_type: &str) -> bool {
    TYPE_MAPPINGS.contains_key(field_type)
}

/// All mapped type tags, in table order
pub fn known_field_types() -> impl Iterator<Item = &'static str> {
    TYPE_MAPPINGS.keys().copied()
}
