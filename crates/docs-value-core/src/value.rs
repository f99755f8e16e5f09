//! The generic value produced by the parser.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A parsed property value. Integers and floats stay distinct because the
/// grammar distinguishes them lexically (`5` vs `5.0`).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Only produced for an empty input string.
    Null,
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    /// Key-value pairs in insertion order. Keys are unique.
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as `f64`; integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Map(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Look up a key in a map value. Returns `None` for non-maps.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Convert into a `serde_json::Value`. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as Json;
        match self {
            Value::Null => Json::Null,
            Value::Integer(n) => Json::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(Json::Number)
                .unwrap_or(Json::Null),
            Value::String(s) => Json::String(s.clone()),
            Value::List(items) => Json::Array(items.iter().map(Value::to_json).collect()),
            Value::Map(entries) => Json::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Insert into an ordered map, overwriting an existing key in place.
pub(crate) fn insert_entry(entries: &mut Vec<(String, Value)>, key: String, value: Value) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => entries.push((key, value)),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_entry_overwrites_in_place() {
        let mut entries = Vec::new();
        insert_entry(&mut entries, "A".into(), Value::Integer(1));
        insert_entry(&mut entries, "B".into(), Value::Integer(2));
        insert_entry(&mut entries, "A".into(), Value::Integer(3));
        assert_eq!(
            entries,
            vec![
                ("A".to_string(), Value::Integer(3)),
                ("B".to_string(), Value::Integer(2)),
            ]
        );
    }

    #[test]
    fn serialize_matches_to_json() {
        let value = Value::Map(vec![
            ("Name".into(), Value::String("Desc_Foo_C".into())),
            ("Amount".into(), Value::Integer(5)),
            ("Ratio".into(), Value::Float(0.25)),
            (
                "Parts".into(),
                Value::List(vec![Value::Integer(1), Value::Null]),
            ),
        ]);
        let expected = json!({"Name": "Desc_Foo_C", "Amount": 5, "Ratio": 0.25, "Parts": [1, null]});
        assert_eq!(value.to_json(), expected);
        assert_eq!(serde_json::to_value(&value).unwrap(), expected);
    }

    #[test]
    fn serialized_map_keeps_insertion_order() {
        let value = Value::Map(vec![
            ("Z".into(), Value::Integer(1)),
            ("A".into(), Value::Integer(2)),
        ]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"Z":1,"A":2}"#);
    }

    #[test]
    fn infinite_float_becomes_null() {
        assert_eq!(Value::Float(f64::INFINITY).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Integer(3).as_f64(), Some(3.0));
        assert_eq!(Value::Float(1.5).as_i64(), None);
        assert_eq!(Value::String("x".into()).as_str(), Some("x"));
        assert!(Value::List(vec![]).get("x").is_none());
    }
}
