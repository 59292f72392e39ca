//! Schema Translator
//!
//! Pure, single-pass mapping from a [`Base`] to an [`OpenApiDocument`].
//! Nothing here performs I/O or mutates its input. Degraded fields never
//! abort translation; they are collected into [`Warnings`] and returned
//! alongside the document.

use crate::base::schema::{
    Base, Field, Table, LINKED_RECORDS_TYPE, MULTIPLE_SELECTS_TYPE, SINGLE_SELECT_TYPE,
};
use crate::error::Result;
use crate::openapi::document::{
    Components, Info, OpenApiDocument, Operation, Parameter, ParameterStyle, PathItem, Response,
    Schema, SecurityRequirement, SecurityScheme, Server, BEARER_SCHEME_NAME, OPENAPI_VERSION,
};
use crate::openapi::naming::{
    derive_schema_name, list_response_name, operation_id, table_path, CollisionPolicy, SchemaNames,
    SchemaRename, UNKNOWN_TABLE_NAME,
};
use crate::openapi::type_mapping;
use indexmap::{IndexMap, IndexSet};

/// Default server URL
pub const DEFAULT_SERVER_URL: &str = "https://api.airtable.com/v0";

/// Default server description
pub const DEFAULT_SERVER_DESCRIPTION: &str = "API URL";

/// Default `info.version`
pub const DEFAULT_API_VERSION: &str = "v0";

/// Largest page size the list endpoint accepts
pub const MAX_PAGE_SIZE: i64 = 100;

/// Document-level settings
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOptions {
    /// `info.title`; derived from the base name when `None`
    pub title: Option<String>,
    /// `info.description`; derived from the base name when `None`
    pub description: Option<String>,
    /// `info.version`
    pub version: String,
    /// The single server entry
    pub server_url: String,
    pub server_description: String,
    /// How to handle tables that derive the same schema name
    pub collision_policy: CollisionPolicy,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: None,
            description: None,
            version: DEFAULT_API_VERSION.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            server_description: DEFAULT_SERVER_DESCRIPTION.to_string(),
            collision_policy: CollisionPolicy::default(),
        }
    }
}

/// Location of a field inside the base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRef {
    pub table: String,
    pub field: String,
}

/// A linked record field whose target table is not in the base
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingLink {
    pub table: String,
    pub field: String,
    /// The id that failed to resolve, or `None` when the field had no options
    pub linked_table_id: Option<String>,
}

/// Non-fatal problems found during translation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Warnings {
    /// Field type tags without a static mapping, first occurrence order
    pub unmapped_types: IndexSet<String>,
    /// Fields that carried no type at all
    pub missing_types: Vec<FieldRef>,
    /// Linked record fields that point outside the base
    pub dangling_links: Vec<DanglingLink>,
    /// Tables whose schema name was suffixed to stay unique
    pub renamed_schemas: Vec<SchemaRename>,
}

impl Warnings {
    pub fn is_empty(&self) -> bool {
        self.unmapped_types.is_empty()
            && self.missing_types.is_empty()
            && self.dangling_links.is_empty()
            && self.renamed_schemas.is_empty()
    }

    /// Total number of distinct warnings
    pub fn len(&self) -> usize {
        self.unmapped_types.len()
            + self.missing_types.len()
            + self.dangling_links.len()
            + self.renamed_schemas.len()
    }
}

/// One table's contribution to the document
#[derive(Debug, Clone, PartialEq)]
pub struct TableTranslation {
    /// Component key of `record_schema`
    pub schema_name: String,
    /// Object schema of the record's `fields`
    pub record_schema: Schema,
    /// Paged list response wrapping `record_schema`
    pub list_response_schema: Schema,
    /// `GET` list operation
    pub path_item: PathItem,
}

/// Where a table ended up in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub table_name: String,
    pub schema_name: String,
    pub path: String,
    pub field_count: usize,
}

/// Result of translating a whole base
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub document: OpenApiDocument,
    pub warnings: Warnings,
    /// One entry per table, in base order
    pub endpoints: Vec<Endpoint>,
}

/// Translates the tables and fields of one base
pub struct Translator<'a> {
    base: &'a Base,
    names: SchemaNames,
}

impl<'a> Translator<'a> {
    /// Create a translator, resolving schema names for every table
    ///
    /// Fails only with [`CollisionPolicy::Fail`] when two tables derive the
    /// same schema name.
    pub fn new(base: &'a Base, policy: CollisionPolicy) -> Result<Self> {
        let names = SchemaNames::assign(base, policy)?;
        Ok(Self { base, names })
    }

    /// Resolved schema names
    pub fn schema_names(&self) -> &SchemaNames {
        &self.names
    }

    /// Schema for a single field. Never fails.
    pub fn translate_field(&self, table: &Table, field: &Field, warnings: &mut Warnings) -> Schema {
        let Some(field_type) = field.field_type.as_deref() else {
            tracing::warn!(table = %table.name, field = %field.name, "field type is undefined");
            warnings.missing_types.push(FieldRef {
                table: table.name.clone(),
                field: field.name.clone(),
            });
            return Schema::string()
                .with_description(format!("Unknown field type for {}", field.name));
        };

        if field_type == LINKED_RECORDS_TYPE {
            return self.translate_link(table, field, warnings);
        }

        let Some(mut schema) = type_mapping::mapped_schema(field_type) else {
            tracing::warn!(
                table = %table.name,
                field = %field.name,
                field_type,
                "no OpenAPI definition for field type"
            );
            warnings.unmapped_types.insert(field_type.to_string());
            return Schema::string()
                .with_description(format!("Unmapped Airtable type: {}", field_type));
        };

        // A multipleSelects value is an array of choice names, so the enum
        // constrains its items. An empty choice list yields no enum at all;
        // `enum: []` would reject every value.
        if let Some(choices) = field.choices() {
            let names = choices.iter().map(|c| c.name.clone());
            match field_type {
                SINGLE_SELECT_TYPE => schema.enum_values = Some(names.collect()),
                MULTIPLE_SELECTS_TYPE => {
                    if let Some(items) = schema.items.as_mut() {
                        items.enum_values = Some(names.collect());
                    }
                }
                _ => {}
            }
        }

        if let Some(description) = field.description() {
            schema.description = Some(description.to_string());
        }

        schema
    }

    fn translate_link(&self, table: &Table, field: &Field, warnings: &mut Warnings) -> Schema {
        let linked_id = field.linked_table_id();
        let resolved = linked_id.and_then(|id| {
            let target = self.base.table_by_id(id)?;
            let schema_name = self.names.by_table_id(id)?;
            Some((target.name.as_str(), schema_name))
        });

        let (linked_name, linked_schema) = match resolved {
            Some(pair) => pair,
            None => {
                tracing::warn!(
                    table = %table.name,
                    field = %field.name,
                    linked_table_id = linked_id.unwrap_or("<none>"),
                    "linked table does not exist"
                );
                warnings.dangling_links.push(DanglingLink {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    linked_table_id: linked_id.map(str::to_string),
                });
                (UNKNOWN_TABLE_NAME, UNKNOWN_TABLE_NAME)
            }
        };

        let description = field.description().map(str::to_string).unwrap_or_else(|| {
            format!(
                "Array of record IDs linking to the '{}' table.",
                linked_name
            )
        });

        Schema {
            description: Some(description),
            linked_table: Some(linked_schema.to_string()),
            ..Schema::array(Schema::string())
        }
    }

    /// Record schema, list response schema and path item for one table
    ///
    /// A table borrowed from the translator's base gets the name resolved
    /// for its position, so tables sharing an id keep distinct names.
    /// Other tables use the name of the first table with the same id, or
    /// their derived name.
    pub fn translate_table(&self, table: &Table, warnings: &mut Warnings) -> TableTranslation {
        let schema_name = self
            .base
            .tables
            .iter()
            .position(|t| std::ptr::eq(t, table))
            .and_then(|index| self.names.get(index))
            .or_else(|| self.names.by_table_id(&table.id))
            .map(str::to_string)
            .unwrap_or_else(|| derive_schema_name(&table.name));
        self.translate_table_as(table, schema_name, warnings)
    }

    fn translate_table_as(
        &self,
        table: &Table,
        schema_name: String,
        warnings: &mut Warnings,
    ) -> TableTranslation {
        tracing::debug!(table = %table.name, schema = %schema_name, fields = table.fields.len(), "translating table");

        let record_schema = Schema::object(
            table
                .fields
                .iter()
                .map(|field| (field.name.clone(), self.translate_field(table, field, warnings))),
        );

        let list_response_schema = list_response_schema(&schema_name);
        let path_item = list_path_item(table, &schema_name);

        TableTranslation {
            schema_name,
            record_schema,
            list_response_schema,
            path_item,
        }
    }
}

/// `{records: [{id, createdTime, fields: $ref}], offset}`
fn list_response_schema(schema_name: &str) -> Schema {
    let record = Schema::object([
        ("id", Schema::string()),
        ("createdTime", Schema::string().with_format("date-time")),
        ("fields", Schema::reference(schema_name)),
    ]);

    Schema::object([
        ("records", Schema::array(record)),
        ("offset", Schema::string()),
    ])
}

fn list_path_item(table: &Table, schema_name: &str) -> PathItem {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response::json(
            "Successful response",
            Schema::reference(&list_response_name(schema_name)),
        ),
    );

    PathItem {
        get: Some(Operation {
            operation_id: Some(operation_id(schema_name)),
            tags: vec![table.name.clone()],
            summary: Some(format!("List records in {}", table.name)),
            description: table.description().map(str::to_string),
            parameters: list_parameters(),
            responses,
        }),
    }
}

/// Query parameters accepted by every list endpoint
pub fn list_parameters() -> Vec<Parameter> {
    let sort_item = Schema::object([
        ("field", Schema::string()),
        ("direction", Schema::string().with_enum(["asc", "desc"])),
    ])
    .with_required(["field"]);

    vec![
        Parameter::query(
            "fields",
            Schema::array(Schema::string()),
            "Array of field names to be returned in the records. If not specified, all fields are returned.",
        )
        .with_style(ParameterStyle::Form, true),
        Parameter::query(
            "filterByFormula",
            Schema::string(),
            "A formula used to filter records.",
        ),
        Parameter::query(
            "maxRecords",
            Schema::integer().with_range(Some(1), None),
            "The maximum total number of records that will be returned in your requests.",
        ),
        Parameter::query(
            "pageSize",
            Schema::integer().with_range(Some(1), Some(MAX_PAGE_SIZE)),
            "The number of records returned in each request. Must be less than or equal to 100.",
        ),
        Parameter::query(
            "sort",
            Schema::array(sort_item),
            "A list of sort objects, each with a field name and a direction ('asc' or 'desc').",
        )
        .with_style(ParameterStyle::DeepObject, true),
        Parameter::query(
            "view",
            Schema::string(),
            "The name or ID of a view in the table.",
        ),
        Parameter::query("offset", Schema::string(), "The pagination offset."),
    ]
}

fn document_shell(base: &Base, options: &DocumentOptions) -> OpenApiDocument {
    let title = options
        .title
        .clone()
        .unwrap_or_else(|| format!("{} API (Read-Only)", base.name));
    let description = options.description.clone().unwrap_or_else(|| {
        format!(
            "Airtable API definition for read-only operations into {}",
            base.name
        )
    });

    let mut security_schemes = IndexMap::new();
    security_schemes.insert(BEARER_SCHEME_NAME.to_string(), SecurityScheme::bearer());

    let mut requirement = SecurityRequirement::new();
    requirement.insert(BEARER_SCHEME_NAME.to_string(), Vec::new());

    OpenApiDocument {
        openapi: OPENAPI_VERSION.to_string(),
        info: Info {
            title,
            description: Some(description),
            version: options.version.clone(),
        },
        servers: vec![Server {
            url: options.server_url.clone(),
            description: Some(options.server_description.clone()),
        }],
        components: Components {
            security_schemes,
            schemas: IndexMap::new(),
        },
        security: vec![requirement],
        paths: IndexMap::new(),
    }
}

/// Path key for `table` that is not yet in `document`
///
/// The table name is preferred, then the table id, then the id with a
/// `-2`, `-3`, ... suffix when several tables share both.
fn unique_path(document: &OpenApiDocument, base_id: &str, table: &Table) -> String {
    let path = table_path(base_id, &table.name);
    if !document.paths.contains_key(&path) {
        return path;
    }

    tracing::warn!(table = %table.name, "duplicate table name, using table id in path");
    let mut path = table_path(base_id, &table.id);
    let mut n = 2;
    while document.paths.contains_key(&path) {
        tracing::warn!(table = %table.name, table_id = %table.id, "duplicate table id in path");
        path = table_path(base_id, &format!("{}-{}", table.id, n));
        n += 1;
    }
    path
}

/// Translate a whole base into an OpenAPI document plus warnings
///
/// Tables are emitted in base order. Identical input always yields
/// identical output. The only error is a schema name collision under
/// [`CollisionPolicy::Fail`].
pub fn translate_base(base: &Base, options: &DocumentOptions) -> Result<Translation> {
    let translator = Translator::new(base, options.collision_policy)?;
    let mut document = document_shell(base, options);
    let mut warnings = Warnings {
        renamed_schemas: translator.schema_names().renames().to_vec(),
        ..Warnings::default()
    };
    let mut endpoints = Vec::with_capacity(base.tables.len());

    for rename in &warnings.renamed_schemas {
        tracing::warn!(
            table = %rename.table_name,
            derived = %rename.derived,
            assigned = %rename.assigned,
            "schema name already in use, renamed"
        );
    }

    for (index, table) in base.tables.iter().enumerate() {
        let schema_name = translator
            .schema_names()
            .get(index)
            .map(str::to_string)
            .unwrap_or_default();
        let translated = translator.translate_table_as(table, schema_name, &mut warnings);

        let path = unique_path(&document, &base.id, table);

        document.components.schemas.insert(
            translated.schema_name.clone(),
            translated.record_schema,
        );
        document.components.schemas.insert(
            list_response_name(&translated.schema_name),
            translated.list_response_schema,
        );
        document.paths.insert(path.clone(), translated.path_item);

        endpoints.push(Endpoint {
            table_name: table.name.clone(),
            schema_name: translated.schema_name,
            path,
            field_count: table.fields.len(),
        });
    }

    tracing::debug!(
        tables = base.tables.len(),
        warnings = warnings.len(),
        "translation complete"
    );

    Ok(Translation {
        document,
        warnings,
        endpoints,
    })
}
