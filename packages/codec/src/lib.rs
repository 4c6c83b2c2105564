//! Propstore Codec: Wire Formats for the Property Tree
//!
//! This layer turns a [`propstore_tree::Value`] into bytes and back, in
//! three representations behind one [`Codec`] interface:
//!
//! - [`BinaryCodec`]: self-describing archival encoding; round-trips every
//!   tree, including byte blobs and the full numeric range
//! - [`JsonCodec`]: JSON text, restricted to the JSON data model
//! - [`PlistCodec`]: property lists, XML or compact binary
//!
//! Each codec validates a tree against its data model before encoding and
//! refuses rather than emitting something that cannot round-trip. File
//! writes replace the target atomically.
//!
//! [`Format`] names the three built-ins and hands out shared stateless
//! instances, so most callers never construct a codec:
//!
//! ```rust
//! use propstore_codec::Format;
//! use propstore_tree::Value;
//!
//! let tree = Value::from(vec![1i64, 2, 3]);
//! let bytes = Format::Json.encode(&tree).unwrap();
//! assert_eq!(Format::Json.decode(&bytes).unwrap(), tree);
//! ```

pub use bytes::Bytes;

mod binary;
mod codec;
mod error;
mod format;
mod json;
mod plist;

pub use self::binary::BinaryCodec;
pub use self::codec::Codec;
pub use self::error::Error;
pub use self::format::Format;
pub use self::json::JsonCodec;
pub use self::plist::{PlistCodec, PlistRepresentation};
