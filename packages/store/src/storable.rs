//! The Storable contract and its derived encode/decode surface.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use propstore_codec::{Error, Format};
use propstore_tree::{sequence, sequence_map, Map, Value};

use crate::Store;

/// A type that can read and write its properties to a [`Store`].
///
/// A conformer supplies two things: field extraction (`from_store`,
/// returning `None` when a required field is missing or mistyped) and
/// field emission (`write`). Everything else - property-map and file
/// round-trips, text and data conversion, list support, nested record
/// access on `Store` - is derived.
///
/// # Hooks
///
/// Three defaulted methods give a conformer control at fixed points
/// without touching the derived surface:
///
/// - [`migrate`](Storable::migrate) runs on the raw store before field
///   extraction (the place to remap fields from older layouts),
/// - [`did_decode`](Storable::did_decode) runs after a successful
///   extraction,
/// - [`will_encode`](Storable::will_encode) runs after `write`, before the
///   emitted map is taken (the place to stamp a version marker).
///
/// The hooks are applied by [`from_properties`](Storable::from_properties)
/// and [`properties`](Storable::properties), which every derived entry
/// point - including nested record access - goes through, so they take
/// effect at every nesting depth.
pub trait Storable: Sized {
    /// Attempt construction from a store.
    ///
    /// Returns `None`, rather than panicking, when any required field is
    /// absent or of the wrong underlying type.
    fn from_store(store: &Store) -> Option<Self>;

    /// Write the receiver's fields into the given store.
    fn write(&self, store: &mut Store);

    /// Adjust a raw store before field extraction runs.
    fn migrate(store: Store) -> Store {
        store
    }

    /// Observe the store after a successful decode.
    fn did_decode(&mut self, _store: &Store) {}

    /// Adjust the emitted store before it is taken as the property map.
    fn will_encode(&self, _store: &mut Store) {}

    /// The receiver's property map.
    fn properties(&self) -> Map {
        let mut store = Store::new();
        self.write(&mut store);
        self.will_encode(&mut store);
        store.into_properties()
    }

    /// Construct from a property map.
    ///
    /// This is the canonical decode entry point: it applies
    /// [`migrate`](Storable::migrate), extracts, then applies
    /// [`did_decode`](Storable::did_decode).
    fn from_properties(properties: Map) -> Option<Self> {
        let store = Self::migrate(Store::from_properties(properties));
        let mut value = Self::from_store(&store)?;
        value.did_decode(&store);
        Some(value)
    }

    /// Read an instance from a file. The decoded tree must be a map.
    fn from_file(path: &Path, format: Format) -> Result<Self, Error> {
        record_from_tree(format.read_file(path)?, format)
    }

    /// Read an instance from a property-list file.
    fn from_plist_file(path: &Path) -> Result<Self, Error> {
        Self::from_file(path, Format::Plist)
    }

    /// Read an instance from a JSON file.
    fn from_json_file(path: &Path) -> Result<Self, Error> {
        Self::from_file(path, Format::Json)
    }

    /// Read an instance from a binary file.
    fn from_binary_file(path: &Path) -> Result<Self, Error> {
        Self::from_file(path, Format::Binary)
    }

    /// Decode an instance from binary wire bytes.
    fn from_data(bytes: &[u8]) -> Result<Self, Error> {
        record_from_tree(Format::Binary.decode(bytes)?, Format::Binary)
    }

    /// Encode the receiver and write it to a file, atomically.
    /// `Format::Plist` is the conventional choice for settings-style data.
    fn write_to(&self, path: &Path, format: Format) -> Result<(), Error> {
        format.write_file(&Value::Map(self.properties()), path)
    }

    /// The receiver as a JSON string.
    fn to_json(&self) -> Result<String, Error> {
        Format::Json.encode_text(&Value::Map(self.properties()))
    }

    /// The receiver as binary wire bytes.
    fn to_data(&self) -> Result<Bytes, Error> {
        Format::Binary.encode(&Value::Map(self.properties()))
    }
}

fn record_from_tree<T: Storable>(tree: Value, format: Format) -> Result<T, Error> {
    let map = tree.into_map().ok_or(Error::UnexpectedShape {
        format,
        expected: "a map",
    })?;
    T::from_properties(map).ok_or(Error::IncompleteRecord)
}

/// The list-level mirror of [`Storable`], implemented for `Vec<T>`.
///
/// Every constructor requires *all* elements to decode; one failing
/// element voids the whole list.
pub trait StorableList: Sized {
    /// Construct a list from one property map per element, all-or-nothing.
    fn from_property_lists(lists: Vec<Map>) -> Option<Self>;

    /// One property map per element, in order.
    fn property_lists(&self) -> Vec<Map>;

    /// Read a list from a file. The decoded tree must be an array of maps.
    fn from_file(path: &Path, format: Format) -> Result<Self, Error> {
        list_from_tree(format.read_file(path)?, format)
    }

    /// Read a list from a property-list file.
    fn from_plist_file(path: &Path) -> Result<Self, Error> {
        Self::from_file(path, Format::Plist)
    }

    /// Read a list from a JSON file.
    fn from_json_file(path: &Path) -> Result<Self, Error> {
        Self::from_file(path, Format::Json)
    }

    /// Read a list from a binary file.
    fn from_binary_file(path: &Path) -> Result<Self, Error> {
        Self::from_file(path, Format::Binary)
    }

    /// Decode a list from binary wire bytes.
    fn from_data(bytes: &[u8]) -> Result<Self, Error> {
        list_from_tree(Format::Binary.decode(bytes)?, Format::Binary)
    }

    /// Encode the list and write it to a file, atomically.
    fn write_to(&self, path: &Path, format: Format) -> Result<(), Error> {
        format.write_file(&lists_to_value(self.property_lists()), path)
    }

    /// The list as a JSON string.
    fn to_json(&self) -> Result<String, Error> {
        Format::Json.encode_text(&lists_to_value(self.property_lists()))
    }

    /// The list as binary wire bytes.
    fn to_data(&self) -> Result<Bytes, Error> {
        Format::Binary.encode(&lists_to_value(self.property_lists()))
    }
}

impl<T: Storable> StorableList for Vec<T> {
    fn from_property_lists(lists: Vec<Map>) -> Option<Self> {
        sequence(lists.into_iter().map(T::from_properties).collect())
    }

    fn property_lists(&self) -> Vec<Map> {
        self.iter().map(Storable::properties).collect()
    }
}

fn list_from_tree<L: StorableList>(tree: Value, format: Format) -> Result<L, Error> {
    let shape = Error::UnexpectedShape {
        format,
        expected: "an array of maps",
    };
    let arr = match tree.into_array() {
        Some(arr) => arr,
        None => return Err(shape),
    };
    let lists = match arr.into_iter().map(Value::into_map).collect() {
        Some(lists) => lists,
        None => return Err(shape),
    };
    L::from_property_lists(lists).ok_or(Error::IncompleteRecord)
}

fn lists_to_value(lists: Vec<Map>) -> Value {
    Value::Array(lists.into_iter().map(Value::Map).collect())
}

// Nested record access. These sit beside the scalar accessors on Store but
// live here because they are defined by the Storable contract.
impl Store {
    /// Read the map entry at `key` as a record.
    ///
    /// Builds a transient sub-store from the nested map and defers to the
    /// conformer's own construction contract.
    pub fn record<V: Storable>(&self, key: &str) -> Option<V> {
        V::from_properties(self.dictionary(key)?.clone())
    }

    /// Read the entry at `key` as a list of records.
    ///
    /// The entry must be an array of maps; one element failing to
    /// construct voids the whole list.
    pub fn records<V: Storable>(&self, key: &str) -> Option<Vec<V>> {
        let arr = self.array(key)?;
        sequence(
            arr.iter()
                .map(|v| V::from_properties(v.as_map()?.clone()))
                .collect(),
        )
    }

    /// Read the entry at `key` as a string-keyed map of records.
    ///
    /// Same all-or-nothing rule as [`records`](Store::records), keyed by
    /// string instead of position.
    pub fn record_map<V: Storable>(&self, key: &str) -> Option<BTreeMap<String, V>> {
        let dict = self.dictionary(key)?;
        sequence_map(
            dict.iter()
                .map(|(k, v)| {
                    let record = v.as_map().cloned().and_then(V::from_properties);
                    (k.clone(), record)
                })
                .collect(),
        )
    }

    /// Set the entry at `key` to a record's property map.
    ///
    /// `None` is a no-op by contract, as with
    /// [`set_opt`](Store::set_opt); for an optional field, pass
    /// `field.as_ref()`.
    pub fn set_record<V: Storable>(&mut self, key: impl Into<String>, value: Option<&V>) {
        if let Some(value) = value {
            self.set(key, Value::Map(value.properties()));
        }
    }

    /// Set the entry at `key` to an array of record property maps.
    /// `None` is a no-op.
    pub fn set_records<V: Storable>(&mut self, key: impl Into<String>, values: Option<&[V]>) {
        if let Some(values) = values {
            let arr = values.iter().map(|v| Value::Map(v.properties())).collect();
            self.set(key, Value::Array(arr));
        }
    }

    /// Set the entry at `key` to a map of record property maps.
    /// `None` is a no-op.
    pub fn set_record_map<V: Storable>(
        &mut self,
        key: impl Into<String>,
        values: Option<&BTreeMap<String, V>>,
    ) {
        if let Some(values) = values {
            let map = values
                .iter()
                .map(|(k, v)| (k.clone(), Value::Map(v.properties())))
                .collect();
            self.set(key, Value::Map(map));
        }
    }
}

/// A store is itself storable: it reads back as a copy and writes by
/// copying its entries into the target.
impl Storable for Store {
    fn from_store(store: &Store) -> Option<Self> {
        Some(store.clone())
    }

    fn write(&self, store: &mut Store) {
        for (key, value) in self.properties() {
            store.set(key.clone(), value.clone());
        }
    }
}
