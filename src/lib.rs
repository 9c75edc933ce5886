#![deny(unsafe_code)]

//! An insertion-order preserving key-value map.
//!
//! [`SeqMap`] keeps keys and values in two parallel vectors in lockstep
//! and looks keys up by linear scan, so keys only need the [`Key`]
//! equality relation, not `Hash` or `Ord`. Iteration order is insertion
//! order; overwriting a key keeps its position. The `json` feature (on by
//! default) adds conversions to and from a plain JSON object plus a
//! serialization-based deep copy.
//!
//! ```
//! use seqmap::SeqMap;
//!
//! let mut map = SeqMap::new();
//! map.insert(1, "a");
//! map.insert(2, "b");
//! map.insert(1, "c");
//! assert_eq!(map.keys(), [1, 2]);
//! assert_eq!(map.get(&1), Some(&"c"));
//!
//! map.retain(|k, _| k % 2 == 0);
//! assert_eq!(map.keys(), [2]);
//! ```

pub mod key;
pub mod map;

#[cfg(feature = "json")]
pub mod json;

#[cfg(feature = "serde")]
mod serde;

pub use key::Key;
pub use map::SeqMap;

#[cfg(feature = "json")]
pub use json::{JsonError, JsonObject};
