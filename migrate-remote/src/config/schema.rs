//! Identifier and field schemas declared by a destination

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Name of the identifier used when none are configured
pub const DEFAULT_ID_NAME: &str = "id";

/// Declared type of an identifier field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IdType {
    String,
    Integer,
    Float,
    Boolean,
    /// Any other type name, passed through to the engine untouched
    Other(String),
}

impl IdType {
    pub fn as_str(&self) -> &str {
        match self {
            IdType::String => "string",
            IdType::Integer => "integer",
            IdType::Float => "float",
            IdType::Boolean => "boolean",
            IdType::Other(name) => name,
        }
    }
}

impl From<String> for IdType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => IdType::String,
            "integer" | "int" => IdType::Integer,
            "float" => IdType::Float,
            "boolean" | "bool" => IdType::Boolean,
            _ => IdType::Other(name),
        }
    }
}

impl From<IdType> for String {
    fn from(id_type: IdType) -> Self {
        id_type.as_str().to_string()
    }
}

impl std::fmt::Display for IdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type descriptor of one identifier field
///
/// Only `type` is interpreted; any other settings (length, unsigned, ...)
/// are kept so they can be handed back to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdDescriptor {
    #[serde(rename = "type")]
    pub id_type: IdType,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IdDescriptor {
    pub fn new(id_type: IdType) -> Self {
        Self {
            id_type,
            extra: Map::new(),
        }
    }

    pub fn string() -> Self {
        Self::new(IdType::String)
    }
}

/// Ordered identifier fields a destination produces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierSchema {
    fields: IndexMap<String, IdDescriptor>,
}

impl IdentifierSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema used when the destination tracks no identifiers: `{id: string}`
    pub fn default_id() -> Self {
        Self::new().with(DEFAULT_ID_NAME, IdDescriptor::string())
    }

    /// Add a field, replacing the descriptor if the name already exists
    pub fn with(mut self, name: impl Into<String>, descriptor: IdDescriptor) -> Self {
        self.fields.insert(name.into(), descriptor);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&IdDescriptor> {
        self.fields.get(name)
    }

    /// Identifier names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|n| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &IdDescriptor)> {
        self.fields.iter().map(|(n, d)| (n.as_str(), d))
    }

    /// The single identifier name, if exactly one is declared
    pub fn single(&self) -> Option<&str> {
        match self.fields.len() {
            1 => self.fields.keys().next().map(|n| n.as_str()),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Declared destination fields, name to description
pub type FieldSchema = Map<String, Value>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_id_schema() {
        let schema = IdentifierSchema::default_id();
        assert_eq!(schema.single(), Some("id"));
        assert_eq!(schema.get("id"), Some(&IdDescriptor::string()));
    }

    #[test]
    fn test_deserialize_keeps_declaration_order() {
        let schema: IdentifierSchema = serde_json::from_value(json!({
            "sku": {"type": "string"},
            "order_id": {"type": "integer", "unsigned": true}
        }))
        .unwrap();

        let names: Vec<&str> = schema.names().collect();
        assert_eq!(names, vec!["sku", "order_id"]);
        assert_eq!(schema.single(), None);

        let order_id = schema.get("order_id").unwrap();
        assert_eq!(order_id.id_type, IdType::Integer);
        assert_eq!(order_id.extra.get("unsigned"), Some(&json!(true)));
    }

    #[test]
    fn test_deserialize_from_toml() {
        let schema: IdentifierSchema = toml::from_str(
            r#"
            remote_id = { type = "string" }
            revision = { type = "uuid" }
            "#,
        )
        .unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(
            schema.get("revision").unwrap().id_type,
            IdType::Other("uuid".to_string())
        );
    }

    #[test]
    fn test_serialize_round_trips_descriptor() {
        let schema = IdentifierSchema::default_id();
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({"id": {"type": "string"}})
        );
    }

    #[test]
    fn test_with_replaces_existing() {
        let schema =
            IdentifierSchema::default_id().with("id", IdDescriptor::new(IdType::Integer));
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.get("id").unwrap().id_type, IdType::Integer);
    }
}
