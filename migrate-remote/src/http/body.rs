//! Request body formats and encoding

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::Record;

/// How the record is serialized into the POST body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestFormat {
    /// `application/json` body
    Json,
    /// `application/x-www-form-urlencoded` body (default)
    #[default]
    #[serde(alias = "form_params")]
    Form,
    /// `multipart/form-data` body with one text part per field
    Multipart,
}

impl RequestFormat {
    pub fn label(&self) -> &'static str {
        match self {
            RequestFormat::Json => "json",
            RequestFormat::Form => "form",
            RequestFormat::Multipart => "multipart",
        }
    }
}

impl std::fmt::Display for RequestFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An encoded POST body, ready to hand to an HTTP client
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// JSON object body
    Json(Value),
    /// URL-encoded form pairs
    Form(Vec<(String, String)>),
    /// Multipart text parts as (name, contents)
    Multipart(Vec<(String, String)>),
}

impl RequestBody {
    /// Encode a record in the given format
    pub fn encode(format: RequestFormat, record: Record) -> Self {
        match format {
            RequestFormat::Json => RequestBody::Json(Value::Object(record.into_values())),
            RequestFormat::Form => RequestBody::Form(flatten_form(record.values())),
            RequestFormat::Multipart => RequestBody::Multipart(flatten_form(record.values())),
        }
    }
}

/// Flatten an object into form pairs using bracket notation
///
/// Nested objects become `parent[child]`, arrays `list[0]`. Booleans are sent
/// as `1`/`0` and nulls and empty containers are omitted.
pub fn flatten_form(values: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in values {
        flatten_into(key.clone(), value, &mut pairs);
    }
    pairs
}

fn flatten_into(prefix: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => pairs.push((prefix, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((prefix, n.to_string())),
        Value::String(s) => pairs.push((prefix, s.clone())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(format!("{}[{}]", prefix, i), item, pairs);
            }
        }
        Value::Object(map) => {
            for (key, item) in map {
                flatten_into(format!("{}[{}]", prefix, key), item, pairs);
            }
        }
    }
}
