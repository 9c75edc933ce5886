use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use serde::de::value::MapDeserializer;
use serde::de::{Deserialize, Deserializer, Error, IntoDeserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::key::Key;
use crate::map::SeqMap;

/// Requires crate feature `"serde"`
impl<K, V> Serialize for SeqMap<K, V>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<T>(&self, serializer: T) -> Result<T::Ok, T::Error>
    where
        T: Serializer,
    {
        serializer.collect_map(self)
    }
}

struct SeqMapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for SeqMapVisitor<K, V>
where
    K: Deserialize<'de> + Key,
    V: Deserialize<'de>,
{
    type Value = SeqMap<K, V>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "a map")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut values = SeqMap::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry()? {
            values.insert(key, value);
        }
        Ok(values)
    }
}

/// Requires crate feature `"serde"`
///
/// Entries are inserted in arrival order; a duplicate key in the input
/// collapses onto the first occurrence's slot with the later value.
impl<'de, K, V> Deserialize<'de> for SeqMap<K, V>
where
    K: Deserialize<'de> + Key,
    V: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SeqMapVisitor(PhantomData))
    }
}

impl<'de, K, V, E> IntoDeserializer<'de, E> for SeqMap<K, V>
where
    K: IntoDeserializer<'de, E>,
    V: IntoDeserializer<'de, E>,
    E: Error,
{
    type Deserializer = MapDeserializer<'de, <Self as IntoIterator>::IntoIter, E>;

    fn into_deserializer(self) -> Self::Deserializer {
        MapDeserializer::new(self.into_iter())
    }
}

#[test]
fn test_seqmap_serde_bincode() {
    let to_vec = |map: &SeqMap<i32, i32>| {
        map.iter()
            .map(|t| (*t.0, *t.1))
            .collect::<Vec<(i32, i32)>>()
    };

    let mut map = SeqMap::new();
    map.insert(2, 20);
    map.insert(1, 10);
    map.insert(9, 90);
    map.insert(3, 30);
    map.insert(5, 50);
    assert_eq!(to_vec(&map), [(2, 20), (1, 10), (9, 90), (3, 30), (5, 50)]);

    let data = bincode::serialize(&map).unwrap();
    let map: SeqMap<i32, i32> = bincode::deserialize(&data).unwrap();
    assert_eq!(to_vec(&map), [(2, 20), (1, 10), (9, 90), (3, 30), (5, 50)]);
}

#[cfg(feature = "json")]
#[test]
fn test_seqmap_serde_json_text() {
    let mut map = SeqMap::new();
    map.insert("b".to_string(), 2);
    map.insert("a".to_string(), 1);

    let text = serde_json::to_string(&map).unwrap();
    assert_eq!(text, r#"{"b":2,"a":1}"#);

    let map: SeqMap<String, i32> = serde_json::from_str(&text).unwrap();
    assert_eq!(map.keys(), ["b", "a"]);

    // a duplicate property collapses onto the first slot, later value wins
    let map: SeqMap<String, i32> = serde_json::from_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
    assert_eq!(map.keys(), ["a", "b"]);
    assert_eq!(map.get("a"), Some(&3));
}
