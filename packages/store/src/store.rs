//! The Store type - a typed key/value view over one property map.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use propstore_codec::{Error, Format};
use propstore_tree::{sequence, sequence_map, Map, Value};

use crate::convert::{FromValue, IntoValue};

/// A key/value property container.
///
/// A store owns exactly one string-keyed [`Map`] and layers the typed
/// accessor surface over it: scalar reads and writes through
/// [`FromValue`]/[`IntoValue`], collection reads with all-or-nothing
/// semantics, and sub-store access for nested maps.
///
/// Stores never alias each other's storage. Creating one from a map or
/// from another store copies; a sub-store read copies the nested map. A
/// store is an ordinary owned value with no internal synchronization -
/// share it across threads the way you would share any other owned data.
///
/// # Example
///
/// ```rust
/// use propstore_store::Store;
///
/// let mut store = Store::new();
/// store.set("age", 30i64);
/// store.set("name", "Alice");
///
/// assert_eq!(store.get::<i64>("age"), Some(30));
/// assert_eq!(store.get::<String>("missing"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    properties: Map,
}

impl Store {
    /// Create an empty store.
    pub fn new() -> Store {
        Store::default()
    }

    /// Create a store holding the given properties.
    pub fn from_properties(properties: Map) -> Store {
        Store { properties }
    }

    /// Borrow the underlying map.
    pub fn properties(&self) -> &Map {
        &self.properties
    }

    /// Consume the store, returning the underlying map.
    pub fn into_properties(self) -> Map {
        self.properties
    }

    /// Number of top-level entries.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether an entry exists at `key`, of any type.
    pub fn contains_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    // === Typed access ===

    /// Read the entry at `key` as a `T`.
    ///
    /// Absent if the key is missing or the stored variant does not match
    /// what `T` reads.
    pub fn get<T: FromValue>(&self, key: &str) -> Option<T> {
        T::from_value(self.properties.get(key)?)
    }

    /// Read the entry at `key` as a `T`, or fall back to `default`.
    pub fn get_or<T: FromValue>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Read the entry at `key` as a list of `T`.
    ///
    /// The entry must be an array and every element must read as `T`; one
    /// failing element voids the whole read.
    pub fn get_vec<T: FromValue>(&self, key: &str) -> Option<Vec<T>> {
        let arr = self.array(key)?;
        sequence(arr.iter().map(T::from_value).collect())
    }

    /// Read the entry at `key` as a string-keyed map of `T`.
    ///
    /// Same all-or-nothing rule as [`get_vec`](Store::get_vec), with keys
    /// preserved.
    pub fn get_map<T: FromValue>(&self, key: &str) -> Option<BTreeMap<String, T>> {
        let dict = self.dictionary(key)?;
        sequence_map(
            dict.iter()
                .map(|(k, v)| (k.clone(), T::from_value(v)))
                .collect(),
        )
    }

    /// Set the entry at `key`, overwriting any prior value.
    pub fn set<T: IntoValue>(&mut self, key: impl Into<String>, value: T) {
        self.properties.insert(key.into(), value.into_value());
    }

    /// Set the entry at `key` if a value is present.
    ///
    /// `None` is a no-op by contract: it never clears an existing entry.
    /// Use [`remove`](Store::remove) to clear.
    pub fn set_opt<T: IntoValue>(&mut self, key: impl Into<String>, value: Option<T>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// Set the entry at `key` to an array of the given values.
    pub fn set_vec<T: IntoValue>(&mut self, key: impl Into<String>, values: Vec<T>) {
        let arr = values.into_iter().map(IntoValue::into_value).collect();
        self.properties.insert(key.into(), Value::Array(arr));
    }

    /// Optional-operand form of [`set_vec`](Store::set_vec); `None` is a
    /// no-op.
    pub fn set_vec_opt<T: IntoValue>(&mut self, key: impl Into<String>, values: Option<Vec<T>>) {
        if let Some(values) = values {
            self.set_vec(key, values);
        }
    }

    /// Set the entry at `key` to a map of the given values.
    pub fn set_map<T: IntoValue>(&mut self, key: impl Into<String>, values: BTreeMap<String, T>) {
        let map = values
            .into_iter()
            .map(|(k, v)| (k, v.into_value()))
            .collect();
        self.properties.insert(key.into(), Value::Map(map));
    }

    /// Optional-operand form of [`set_map`](Store::set_map); `None` is a
    /// no-op.
    pub fn set_map_opt<T: IntoValue>(
        &mut self,
        key: impl Into<String>,
        values: Option<BTreeMap<String, T>>,
    ) {
        if let Some(values) = values {
            self.set_map(key, values);
        }
    }

    /// Remove the entry at `key`, returning the previous value if any.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.properties.remove(key)
    }

    // === Untyped views ===

    /// Borrow the raw entry at `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// Borrow the entry at `key` if it is an array.
    pub fn array(&self, key: &str) -> Option<&[Value]> {
        self.raw(key)?.as_array()
    }

    /// Borrow the entry at `key` if it is a map.
    pub fn dictionary(&self, key: &str) -> Option<&Map> {
        self.raw(key)?.as_map()
    }

    /// A new store copied from the nested map at `key`.
    pub fn store(&self, key: &str) -> Option<Store> {
        Some(Store::from_properties(self.dictionary(key)?.clone()))
    }

    // === Format conveniences ===

    /// Read a store from a file. The decoded tree must be a map.
    pub fn from_file(path: &Path, format: Format) -> Result<Store, Error> {
        Self::from_tree(format.read_file(path)?, format)
    }

    /// Parse a store from text. The decoded tree must be a map.
    pub fn from_text(text: &str, format: Format) -> Result<Store, Error> {
        Self::from_tree(format.decode_text(text)?, format)
    }

    /// Decode a store from wire bytes. The decoded tree must be a map.
    pub fn from_data(bytes: &[u8], format: Format) -> Result<Store, Error> {
        Self::from_tree(format.decode(bytes)?, format)
    }

    /// Encode the store and write it to a file, atomically.
    pub fn write_to(&self, path: &Path, format: Format) -> Result<(), Error> {
        format.write_file(&Value::Map(self.properties.clone()), path)
    }

    /// Encode the store to text.
    pub fn to_text(&self, format: Format) -> Result<String, Error> {
        format.encode_text(&Value::Map(self.properties.clone()))
    }

    /// Encode the store to wire bytes.
    pub fn to_data(&self, format: Format) -> Result<Bytes, Error> {
        format.encode(&Value::Map(self.properties.clone()))
    }

    fn from_tree(tree: Value, format: Format) -> Result<Store, Error> {
        match tree.into_map() {
            Some(map) => Ok(Store::from_properties(map)),
            None => Err(Error::UnexpectedShape {
                format,
                expected: "a map",
            }),
        }
    }
}

impl FromValue for Store {
    fn from_value(value: &Value) -> Option<Self> {
        Some(Store::from_properties(value.as_map()?.clone()))
    }
}

impl IntoValue for Store {
    fn into_value(self) -> Value {
        Value::Map(self.into_properties())
    }
}
