//! Conversions between a map and the plain JSON object representation.
//!
//! Requires crate feature `"json"`.

use std::fmt::Display;

use serde::de::DeserializeOwned;
use serde::ser::Serialize;
use serde_json::Value;

use crate::key::Key;
use crate::map::SeqMap;

/// A plain JSON object with string keys, property order preserved.
pub type JsonObject = serde_json::Map<String, Value>;

/// Error raised by the JSON conversions.
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    /// A stored value could not be represented as a JSON tree.
    #[error("value is not representable as JSON: {0}")]
    ToJson(#[source] serde_json::Error),
    /// A JSON tree could not be rebuilt into the map's key or value type.
    #[error("JSON value does not fit the target type: {0}")]
    FromJson(#[source] serde_json::Error),
}

impl<K, V> SeqMap<K, V> {
    /// Exports the map as a plain JSON object, keys in insertion order.
    ///
    /// Every stored key contributes its string form, so non-string keys
    /// are coerced. Two distinct keys whose string forms collide overwrite
    /// each other: the last one wins, at the first one's position, like
    /// ordinary object assignment. Values the format cannot express follow
    /// serde_json's own coercion rules (a non-finite float becomes
    /// `null`). The map itself is unchanged; output values are converted
    /// copies, not shared references.
    pub fn to_object(&self) -> Result<JsonObject, JsonError>
    where
        K: Display,
        V: Serialize,
    {
        let mut object = JsonObject::new();
        for (key, value) in self.iter() {
            let value = serde_json::to_value(value).map_err(JsonError::ToJson)?;
            object.insert(key.to_string(), value);
        }
        Ok(object)
    }

    /// Builds a map from the properties of a plain JSON object.
    ///
    /// Properties are inserted in the object's own order; with
    /// serde_json's `preserve_order` feature that is the insertion order
    /// of the source document. A `JsonObject` holds own properties only,
    /// so nothing inherited can leak in.
    pub fn from_object(object: JsonObject) -> Result<Self, JsonError>
    where
        K: Key + From<String>,
        V: DeserializeOwned,
    {
        let mut map = SeqMap::new();
        map.extend_from_object(object)?;
        Ok(map)
    }

    /// Inserts every property of `object` into the map, in the object's
    /// own order. Properties whose key matches an existing entry
    /// overwrite it in place.
    pub fn extend_from_object(&mut self, object: JsonObject) -> Result<&mut Self, JsonError>
    where
        K: Key + From<String>,
        V: DeserializeOwned,
    {
        for (name, value) in object {
            let value = serde_json::from_value(value).map_err(JsonError::FromJson)?;
            self.insert(K::from(name), value);
        }
        Ok(self)
    }

    /// Produces a deep, reference-free copy by routing every entry through
    /// the JSON tree representation.
    ///
    /// Only data the interchange format can carry survives the round
    /// trip. An entry serde_json cannot faithfully rebuild (a NaN float
    /// serializes to `null`, for example) surfaces as an error rather
    /// than a silently altered copy.
    pub fn deep_clone(&self) -> Result<Self, JsonError>
    where
        K: Key + Serialize + DeserializeOwned,
        V: Serialize + DeserializeOwned,
    {
        let pairs: Vec<(&K, &V)> = self.iter().collect();
        let tree = serde_json::to_value(pairs).map_err(JsonError::ToJson)?;
        let pairs: Vec<(K, V)> = serde_json::from_value(tree).map_err(JsonError::FromJson)?;
        Ok(pairs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_to_object_string_keys() {
        let mut map = SeqMap::new();
        map.insert("b".to_string(), 2);
        map.insert("a".to_string(), 1);

        let object = map.to_object().unwrap();
        let names: Vec<&String> = object.keys().collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(object["a"], 1);
    }

    #[test]
    fn test_to_object_coerces_keys() {
        let mut map = SeqMap::new();
        map.insert(10u32, "ten");
        map.insert(2u32, "two");

        let object = map.to_object().unwrap();
        let names: Vec<&String> = object.keys().collect();
        assert_eq!(names, ["10", "2"]);
    }

    #[test]
    fn test_to_object_collision_last_wins() {
        // two distinct keys with the same string form
        #[derive(PartialEq)]
        struct Tag(u8);
        impl crate::Key for Tag {}
        impl std::fmt::Display for Tag {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "tag")
            }
        }

        let mut map = SeqMap::new();
        map.insert(Tag(1), 1);
        map.insert(Tag(2), 2);
        assert_eq!(map.len(), 2);

        let object = map.to_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["tag"], 2);
    }

    #[test]
    fn test_to_object_nonfinite_becomes_null() {
        let mut map = SeqMap::new();
        map.insert("x".to_string(), f64::NAN);

        let object = map.to_object().unwrap();
        assert!(object["x"].is_null());
    }

    #[test]
    fn test_from_object_keeps_property_order() {
        let mut object = JsonObject::new();
        object.insert("one".to_string(), Value::from(1));
        object.insert("two".to_string(), Value::from(2));
        object.insert("three".to_string(), Value::from(3));

        let map: SeqMap<String, i64> = SeqMap::from_object(object).unwrap();
        assert_eq!(map.keys(), ["one", "two", "three"]);
        assert_eq!(map.values(), [1, 2, 3]);
    }

    #[test]
    fn test_from_object_type_mismatch() {
        let mut object = JsonObject::new();
        object.insert("n".to_string(), Value::from("not a number"));

        let err = SeqMap::<String, i64>::from_object(object).unwrap_err();
        assert!(matches!(err, JsonError::FromJson(_)));
    }

    #[test]
    fn test_extend_from_object_overwrites_in_place() {
        let mut map = SeqMap::new();
        map.insert("a".to_string(), 1i64);
        map.insert("b".to_string(), 2);

        let mut object = JsonObject::new();
        object.insert("a".to_string(), Value::from(100));
        object.insert("c".to_string(), Value::from(3));
        map.extend_from_object(object).unwrap();

        assert_eq!(map.keys(), ["a", "b", "c"]);
        assert_eq!(map.values(), [100, 2, 3]);
    }

    #[test]
    fn test_object_round_trip() {
        let mut map = SeqMap::new();
        map.insert("x".to_string(), vec![1i64, 2, 3]);
        map.insert("y".to_string(), vec![4]);

        let rebuilt: SeqMap<String, Vec<i64>> =
            SeqMap::from_object(map.to_object().unwrap()).unwrap();
        assert_eq!(rebuilt, map);
    }

    #[test]
    fn test_deep_clone_breaks_references() {
        let mut map = SeqMap::new();
        map.insert("xs".to_string(), vec!["a".to_string()]);

        let mut copy = map.deep_clone().unwrap();
        assert_eq!(copy, map);

        copy.get_mut("xs").unwrap().push("b".to_string());
        assert_eq!(copy.get("xs").unwrap().len(), 2);
        assert_eq!(map.get("xs").unwrap().len(), 1);
    }

    #[test]
    fn test_deep_clone_nested_struct() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Point {
            xs: Vec<i32>,
        }

        let mut map = SeqMap::new();
        map.insert(1u32, Point { xs: vec![1, 2] });
        map.insert(2u32, Point { xs: vec![3] });

        let mut copy = map.deep_clone().unwrap();
        assert_eq!(copy, map);

        copy.get_mut(&1).unwrap().xs.push(9);
        assert_eq!(map.get(&1).unwrap().xs, [1, 2]);
    }

    #[test]
    fn test_deep_clone_rejects_unrepresentable() {
        let mut map = SeqMap::new();
        map.insert("x".to_string(), 1.0f64);
        map.insert("y".to_string(), f64::NAN);

        // NaN leaves the tree as null, which no longer fits f64
        let err = map.deep_clone().unwrap_err();
        assert!(matches!(err, JsonError::FromJson(_)));
    }
}
