//! Propstore Tree: The Property Tree Value Model
//!
//! This is the leaf of the propstore stack. Everything at this level is
//! plain data - no keys-with-meaning, no formats, no I/O. A [`Value`] is a
//! dynamically-typed tree of scalars, ordered arrays, and string-keyed
//! maps; it is what every codec parses into and what every store holds.
//!
//! Use this layer for:
//! - Holding decoded data before it is lifted into typed records
//! - Building trees incrementally before encoding
//! - Structural comparison of configuration/state snapshots
//!
//! # Example
//!
//! ```rust
//! use propstore_tree::Value;
//!
//! let mut map = propstore_tree::Map::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30i64));
//! let tree = Value::Map(map);
//!
//! assert!(tree.is_map());
//! ```

mod sequence;
mod value;

pub use sequence::{sequence, sequence_map};
pub use value::{Map, Value};
