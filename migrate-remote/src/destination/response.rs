//! Decoding the remote response into identifiers

use serde_json::{Map, Value};

use super::outcome::IdentifierMap;
use crate::config::IdentifierSchema;
use crate::record::json_type_name;

/// Shape of a successful response body
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A bare string, number or `true`
    Scalar(Value),
    /// A JSON object
    Object(Map<String, Value>),
    /// Anything no identifier can be taken from
    Unusable(Unextractable),
}

/// Why no identifier could be taken from a successful response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unextractable {
    /// Body is not valid JSON
    InvalidJson(String),
    /// Body is JSON, but null, `false` or an array
    UnsupportedShape(&'static str),
    /// Body is a scalar, but more than one identifier is configured
    ScalarForCompositeId { expected: usize },
    /// Body is an object sharing no key with the configured identifiers
    NoMatchingKeys,
}

impl std::fmt::Display for Unextractable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unextractable::InvalidJson(e) => write!(f, "response is not valid JSON: {}", e),
            Unextractable::UnsupportedShape(shape) => {
                write!(f, "response is a JSON {} and carries no identifier", shape)
            }
            Unextractable::ScalarForCompositeId { expected } => write!(
                f,
                "response is a single value but {} identifiers are expected",
                expected
            ),
            Unextractable::NoMatchingKeys => {
                write!(f, "response object has none of the expected identifier keys")
            }
        }
    }
}

impl ResponseBody {
    /// Decode raw response bytes
    pub fn decode(bytes: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => ResponseBody::Object(map),
            Ok(Value::Bool(false)) => ResponseBody::Unusable(Unextractable::UnsupportedShape("false")),
            Ok(value @ (Value::Null | Value::Array(_))) => {
                ResponseBody::Unusable(Unextractable::UnsupportedShape(json_type_name(&value)))
            }
            Ok(scalar) => ResponseBody::Scalar(scalar),
            Err(e) => ResponseBody::Unusable(Unextractable::InvalidJson(e.to_string())),
        }
    }

    /// Project the configured identifiers out of this body
    ///
    /// A scalar maps onto the single configured identifier. An object yields
    /// the entries whose keys are configured identifiers, in response order.
    pub fn extract(self, ids: &IdentifierSchema) -> Result<IdentifierMap, Unextractable> {
        match self {
            ResponseBody::Scalar(value) => match ids.single() {
                Some(name) => {
                    let mut map = IdentifierMap::new();
                    map.insert(name, value);
                    Ok(map)
                }
                None => Err(Unextractable::ScalarForCompositeId { expected: ids.len() }),
            },
            ResponseBody::Object(object) => {
                let mut map = IdentifierMap::new();
                for (key, value) in object {
                    if ids.contains(&key) {
                        map.insert(key, value);
                    }
                }
                if map.is_empty() {
                    Err(Unextractable::NoMatchingKeys)
                } else {
                    Ok(map)
                }
            }
            ResponseBody::Unusable(reason) => Err(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdDescriptor;
    use serde_json::json;

    fn schema(names: &[&str]) -> IdentifierSchema {
        names.iter().fold(IdentifierSchema::new(), |s, n| {
            s.with(*n, IdDescriptor::string())
        })
    }

    #[test]
    fn test_decode_shapes() {
        assert_eq!(ResponseBody::decode(b"\"42\""), ResponseBody::Scalar(json!("42")));
        assert_eq!(ResponseBody::decode(b"42"), ResponseBody::Scalar(json!(42)));
        assert_eq!(ResponseBody::decode(b"true"), ResponseBody::Scalar(json!(true)));
        assert!(matches!(
            ResponseBody::decode(b"{\"id\": 1}"),
            ResponseBody::Object(_)
        ));
        assert_eq!(
            ResponseBody::decode(b"false"),
            ResponseBody::Unusable(Unextractable::UnsupportedShape("false"))
        );
        assert_eq!(
            ResponseBody::decode(b"null"),
            ResponseBody::Unusable(Unextractable::UnsupportedShape("null"))
        );
        assert_eq!(
            ResponseBody::decode(b"[1, 2]"),
            ResponseBody::Unusable(Unextractable::UnsupportedShape("array"))
        );
        assert!(matches!(
            ResponseBody::decode(b"<html>ok</html>"),
            ResponseBody::Unusable(Unextractable::InvalidJson(_))
        ));
        assert!(matches!(
            ResponseBody::decode(b""),
            ResponseBody::Unusable(Unextractable::InvalidJson(_))
        ));
    }

    #[test]
    fn test_scalar_maps_to_single_id() {
        let ids = ResponseBody::decode(b"\"42\"").extract(&schema(&["id"])).unwrap();
        assert_eq!(ids.get("id"), Some(&json!("42")));
        assert_eq!(ids.len(), 1);
    }

    #[test]
    fn test_scalar_with_composite_id_fails() {
        let err = ResponseBody::decode(b"7")
            .extract(&schema(&["sku", "order_id"]))
            .unwrap_err();
        assert_eq!(err, Unextractable::ScalarForCompositeId { expected: 2 });
    }

    #[test]
    fn test_object_intersection() {
        let body = br#"{"order_id": "A1", "extra": "ignored"}"#;
        let ids = ResponseBody::decode(body)
            .extract(&schema(&["sku", "order_id"]))
            .unwrap();
        assert_eq!(ids.into_map(), json!({"order_id": "A1"}).as_object().unwrap().clone());
    }

    #[test]
    fn test_object_intersection_keeps_response_order() {
        let body = br#"{"b": 2, "x": 0, "a": 1}"#;
        let ids = ResponseBody::decode(body).extract(&schema(&["a", "b"])).unwrap();
        let names: Vec<&str> = ids.names().collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_object_without_overlap_fails() {
        let err = ResponseBody::decode(br#"{"status": "ok"}"#)
            .extract(&schema(&["id"]))
            .unwrap_err();
        assert_eq!(err, Unextractable::NoMatchingKeys);
    }

    #[test]
    fn test_object_with_single_id_uses_key_not_whole_body() {
        let ids = ResponseBody::decode(br#"{"id": 5, "name": "x"}"#)
            .extract(&schema(&["id"]))
            .unwrap();
        assert_eq!(ids.get("id"), Some(&json!(5)));
        assert!(ids.get("name").is_none());
    }

    #[test]
    fn test_empty_schema_never_matches() {
        let err = ResponseBody::decode(br#"{"id": 5}"#)
            .extract(&IdentifierSchema::new())
            .unwrap_err();
        assert_eq!(err, Unextractable::NoMatchingKeys);
    }
}
