//! Result types of a successful import

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Destination identifiers returned by the remote endpoint
///
/// Keys are always a subset of the configured identifier names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentifierMap {
    values: Map<String, Value>,
}

impl IdentifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.values
    }
}

impl std::fmt::Display for IdentifierMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .values
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Outcome of importing one record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "ids", rename_all = "snake_case")]
pub enum ExportOutcome {
    /// Accepted; no identifier tracking configured
    Success,
    /// Accepted; identifiers extracted from the response
    Identifiers(IdentifierMap),
}

impl ExportOutcome {
    /// Identifiers to record in the id map, if any
    pub fn identifiers(&self) -> Option<&IdentifierMap> {
        match self {
            ExportOutcome::Success => None,
            ExportOutcome::Identifiers(ids) => Some(ids),
        }
    }

    pub fn into_identifiers(self) -> Option<IdentifierMap> {
        match self {
            ExportOutcome::Success => None,
            ExportOutcome::Identifiers(ids) => Some(ids),
        }
    }
}

impl std::fmt::Display for ExportOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportOutcome::Success => write!(f, "accepted"),
            ExportOutcome::Identifiers(ids) => write!(f, "accepted ({})", ids),
        }
    }
}
