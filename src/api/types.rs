use crate::error::FetchError;
use indexmap::IndexMap;
use serde::Deserialize;

/// Position of a node on the canvas as sent by the API
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ApiPosition {
    pub x: f64,
    pub y: f64,
}

/// Node data referencing the form (component) the node instantiates
#[derive(Debug, Deserialize, Clone)]
pub struct ApiNodeData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub component_key: Option<String>,
    #[serde(default)]
    pub component_type: Option<String>,
    #[serde(default)]
    pub component_id: String,
    #[serde(default)]
    pub name: String,
}

/// Graph node
#[derive(Debug, Deserialize, Clone)]
pub struct ApiNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default)]
    pub position: Option<ApiPosition>,
    pub data: ApiNodeData,
}

/// Edge between two nodes; `source` feeds `target`
#[derive(Debug, Deserialize, Clone)]
pub struct ApiEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// Enumeration metadata for array-typed fields
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ApiFieldItems {
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<String>>,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
}

/// A single entry of `field_schema.properties`
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSchemaField {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "type", default)]
    pub field_type: String,
    #[serde(default)]
    pub avantos_type: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub items: Option<ApiFieldItems>,
}

/// JSON schema describing the fields of a form
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ApiFieldSchema {
    #[serde(rename = "type", default)]
    pub schema_type: Option<String>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, ApiSchemaField>>,
    #[serde(default)]
    pub required: Option<Vec<String>>,
}

/// Form definition from the top-level `forms` array
#[derive(Debug, Deserialize, Clone)]
pub struct ApiFormDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub field_schema: Option<ApiFieldSchema>,
}

/// Complete graph response of the blueprint endpoint
#[derive(Debug, Deserialize, Clone)]
pub struct ApiGraphResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<ApiNode>,
    #[serde(default)]
    pub edges: Vec<ApiEdge>,
    #[serde(default)]
    pub forms: Vec<ApiFormDefinition>,
}

/// Decodes a graph response body.
pub fn parse_graph_response(body: &str) -> Result<ApiGraphResponse, FetchError> {
    Ok(serde_json::from_str(body)?)
}
