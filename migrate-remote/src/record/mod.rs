//! Migrated records and property path access
//!
//! A [`Record`] holds the destination-side values of one migrated row as an
//! ordered JSON object. Nested values are addressed with a [`PropertyPath`]
//! such as `remote/endpoint`.

mod path;

pub use path::{PROPERTY_SEPARATOR, PropertyPath, PropertyPathError};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One unit of migrated data, keyed by property name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    values: Map<String, Value>,
}

/// Error when building a record from arbitrary JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotAnObject {
    /// JSON type that was found instead
    pub found: &'static str,
}

impl std::fmt::Display for NotAnObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record must be a JSON object, found {}", self.found)
    }
}

impl std::error::Error for NotAnObject {}

impl Record {
    /// Build a record from a JSON value, which must be an object
    pub fn from_json(value: Value) -> Result<Self, NotAnObject> {
        match value {
            Value::Object(values) => Ok(Record { values }),
            other => Err(NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    /// Resolve a property path to a value
    ///
    /// Object keys are matched exactly. A segment that parses as an index
    /// addresses an element when the current value is an array.
    pub fn get(&self, path: &PropertyPath) -> Option<&Value> {
        let (first, rest) = path.segments().split_first()?;
        let mut current = self.values.get(first.as_str())?;
        for segment in rest {
            current = child(current, segment)?;
        }
        Some(current)
    }

    /// Remove the value at a property path and return it
    ///
    /// Only the leaf is removed. Objects and arrays that become empty because
    /// of the removal are pruned from their parents, up to (but excluding)
    /// the record itself. Removing an element of an array never renumbers its
    /// siblings: the array becomes an object keyed by the remaining indices.
    pub fn remove(&mut self, path: &PropertyPath) -> Option<Value> {
        let (first, rest) = path.segments().split_first()?;
        if rest.is_empty() {
            return self.values.shift_remove(first.as_str());
        }

        let parent = self.values.get_mut(first.as_str())?;
        let removed = remove_nested(parent, rest)?;
        if is_empty_container(parent) {
            self.values.shift_remove(first.as_str());
        }
        Some(removed)
    }

    /// Copy of this record with the value at `path` removed
    pub fn without(&self, path: &PropertyPath) -> Record {
        let mut copy = self.clone();
        copy.remove(path);
        copy
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Top-level values in insertion order
    pub fn values(&self) -> &Map<String, Value> {
        &self.values
    }

    pub fn into_values(self) -> Map<String, Value> {
        self.values
    }
}

impl From<Map<String, Value>> for Record {
    fn from(values: Map<String, Value>) -> Self {
        Record { values }
    }
}

impl TryFrom<Value> for Record {
    type Error = NotAnObject;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Record::from_json(value)
    }
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

fn child_mut<'a>(value: &'a mut Value, segment: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
        _ => None,
    }
}

fn remove_nested(container: &mut Value, segments: &[String]) -> Option<Value> {
    let (first, rest) = segments.split_first()?;
    if rest.is_empty() {
        return remove_child(container, first);
    }

    let next = child_mut(container, first)?;
    let removed = remove_nested(next, rest)?;
    if is_empty_container(next) {
        remove_child(container, first);
    }
    Some(removed)
}

/// Remove one direct child, keeping the keys of its siblings stable
fn remove_child(container: &mut Value, segment: &str) -> Option<Value> {
    match container {
        Value::Object(map) => map.shift_remove(segment),
        Value::Array(items) => {
            let index = segment.parse::<usize>().ok().filter(|i| *i < items.len())?;
            let items = std::mem::take(items);

            let mut removed = None;
            let mut keyed = Map::new();
            for (i, item) in items.into_iter().enumerate() {
                if i == index {
                    removed = Some(item);
                } else {
                    keyed.insert(i.to_string(), item);
                }
            }
            *container = Value::Object(keyed);
            removed
        }
        _ => None,
    }
}

fn is_empty_container(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
