//! OpenAPI 3.1 document types
//!
//! Only the subset of OpenAPI needed for read-only list endpoints is
//! modelled. Every map is an [`IndexMap`] so that serialization order
//! follows insertion order and regenerating from the same base yields
//! byte-identical output.

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// OpenAPI version emitted by the generator
pub const OPENAPI_VERSION: &str = "3.1.0";

/// Name of the global bearer security scheme
pub const BEARER_SCHEME_NAME: &str = "BearerAuth";

/// Prefix of local component references
const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// OpenAPI root object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    pub components: Components,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<SecurityRequirement>,
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApiDocument {
    /// Serialize to JSON text, 2-space indented when `pretty`
    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Look up a component schema by name
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.components.schemas.get(name)
    }

    /// Look up the list operation registered under `path`
    pub fn list_operation(&self, path: &str) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get.as_ref())
    }
}

/// API information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
}

/// Server information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Security requirement: scheme name to required scopes
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Components
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_schemes: IndexMap<String, SecurityScheme>,
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,
}

/// Security scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "http")]
    Http { scheme: String },
}

impl SecurityScheme {
    /// HTTP bearer authentication
    pub fn bearer() -> Self {
        Self::Http {
            scheme: "bearer".to_string(),
        }
    }
}

/// Path item; only `get` is generated
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
}

/// Operation (endpoint)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, Response>,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
}

/// Parameter serialization style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    Form,
    DeepObject,
}

/// Parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    pub schema: Schema,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// Optional query parameter
    pub fn query(name: impl Into<String>, schema: Schema, description: impl Into<String>) -> Self {
        Self {
            location: ParameterLocation::Query,
            name: name.into(),
            required: None,
            schema,
            style: None,
            explode: None,
            description: Some(description.into()),
        }
    }

    /// Set serialization style and explode flag
    pub fn with_style(mut self, style: ParameterStyle, explode: bool) -> Self {
        self.style = Some(style);
        self.explode = Some(explode);
        self
    }
}

/// Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// JSON response whose body follows `schema`
    pub fn json(description: impl Into<String>, schema: Schema) -> Self {
        let mut content = IndexMap::new();
        content.insert("application/json".to_string(), MediaType { schema });
        Self {
            description: description.into(),
            content,
        }
    }
}

/// Media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Schema,
}

/// JSON Schema fragment
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Schema name of the table a linked record field points at
    #[serde(
        rename = "x-linkedTable",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub linked_table: Option<String>,
}

impl Schema {
    /// Schema of the given JSON type
    pub fn typed(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            ..Self::default()
        }
    }

    /// `{type: "string"}`
    pub fn string() -> Self {
        Self::typed("string")
    }

    /// `{type: "integer"}`
    pub fn integer() -> Self {
        Self::typed("integer")
    }

    /// `{type: "array", items: ...}`
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed("array")
        }
    }

    /// `{type: "object", properties: ...}`
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, Schema)>,
        K: Into<String>,
    {
        Self {
            properties: Some(
                properties
                    .into_iter()
                    .map(|(name, schema)| (name.into(), schema))
                    .collect(),
            ),
            ..Self::typed("object")
        }
    }

    /// Reference to a component schema
    pub fn reference(schema_name: &str) -> Self {
        Self {
            reference: Some(format!("{}{}", SCHEMA_REF_PREFIX, schema_name)),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required<I, S>(mut self, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = required.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_range(mut self, minimum: Option<i64>, maximum: Option<i64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_serialization_skips_empty() {
        let schema = Schema::string().with_format("email");
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"type": "string", "format": "email"})
        );
    }

    #[test]
    fn test_reference_and_extension_names() {
        let schema = Schema::reference("Tasks");
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"$ref": "#/components/schemas/Tasks"})
        );

        let link = Schema {
            linked_table: Some("People".to_string()),
            ..Schema::array(Schema::string())
        };
        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["x-linkedTable"], "People");
        assert_eq!(value["items"]["type"], "string");
    }

    #[test]
    fn test_object_preserves_property_order() {
        let schema = Schema::object([
            ("zeta", Schema::string()),
            ("alpha", Schema::typed("boolean")),
            ("mid", Schema::integer()),
        ]);
        let text = serde_json::to_string(&schema).unwrap();
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        let mid = text.find("mid").unwrap();
        assert!(zeta < alpha && alpha < mid);
    }

    #[test]
    fn test_bearer_scheme_serialization() {
        assert_eq!(
            serde_json::to_value(SecurityScheme::bearer()).unwrap(),
            json!({"type": "http", "scheme": "bearer"})
        );
    }

    #[test]
    fn test_parameter_serialization() {
        let param = Parameter::query("fields", Schema::array(Schema::string()), "Fields")
            .with_style(ParameterStyle::Form, true);
        assert_eq!(
            serde_json::to_value(&param).unwrap(),
            json!({
                "in": "query",
                "name": "fields",
                "schema": {"type": "array", "items": {"type": "string"}},
                "style": "form",
                "explode": true,
                "description": "Fields"
            })
        );

        let sort = Parameter::query("sort", Schema::string(), "Sort")
            .with_style(ParameterStyle::DeepObject, true);
        assert_eq!(serde_json::to_value(&sort).unwrap()["style"], "deepObject");
    }

    #[test]
    fn test_json_response() {
        let response = Response::json("Successful response", Schema::reference("ListTasksResponse"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "description": "Successful response",
                "content": {
                    "application/json": {
                        "schema": {"$ref": "#/components/schemas/ListTasksResponse"}
                    }
                }
            })
        );
    }
}
