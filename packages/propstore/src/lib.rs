//! Propstore: format-agnostic key/value persistence.
//!
//! Propstore is three layers behind one façade: a dynamically-typed
//! property tree ([`Value`]), codecs that carry it to and from binary,
//! JSON, and property-list files ([`Format`]), and a typed store plus the
//! [`Storable`] contract that give domain records round-trip persistence
//! for free.

pub use propstore_codec::{
    BinaryCodec, Bytes, Codec, Error, Format, JsonCodec, PlistCodec, PlistRepresentation,
};
pub use propstore_store::{FromValue, IntoValue, Rgba, Storable, StorableList, Store};
pub use propstore_tree::{sequence, sequence_map, Map, Value};
