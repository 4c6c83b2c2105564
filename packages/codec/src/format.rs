//! Format selection for the built-in codecs.

use std::fmt;
use std::path::Path;

use bytes::Bytes;
use propstore_tree::Value;

use crate::binary::BinaryCodec;
use crate::json::JsonCodec;
use crate::plist::{PlistCodec, PlistRepresentation};
use crate::{Codec, Error};

/// One of the built-in wire formats.
///
/// Each variant maps to a process-wide immutable codec instance with the
/// conventional options (pretty JSON, XML plists); construct a
/// [`JsonCodec`] or [`PlistCodec`] directly to choose others. The set is
/// closed on purpose: no formats are added at runtime, and a `match` over
/// `Format` is exhaustive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    /// Self-describing archival encoding. Round-trips every tree.
    Binary,
    /// JSON text. Restricted to the JSON data model.
    Json,
    /// Property list, XML representation.
    Plist,
}

static BINARY: BinaryCodec = BinaryCodec;
static JSON: JsonCodec = JsonCodec { pretty: true };
static PLIST: PlistCodec = PlistCodec {
    representation: PlistRepresentation::Xml,
};

impl Format {
    /// The shared codec instance for this format.
    pub fn codec(&self) -> &'static dyn Codec {
        match self {
            Format::Binary => &BINARY,
            Format::Json => &JSON,
            Format::Plist => &PLIST,
        }
    }

    /// Short lowercase name, as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Binary => "binary",
            Format::Json => "json",
            Format::Plist => "plist",
        }
    }

    /// Encode a tree into wire bytes. See [`Codec::encode`].
    pub fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        self.codec().encode(value)
    }

    /// Decode wire bytes into a tree. See [`Codec::decode`].
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
        self.codec().decode(bytes)
    }

    /// Encode a tree to text. See [`Codec::encode_text`].
    pub fn encode_text(&self, value: &Value) -> Result<String, Error> {
        self.codec().encode_text(value)
    }

    /// Decode a tree from text. See [`Codec::decode_text`].
    pub fn decode_text(&self, text: &str) -> Result<Value, Error> {
        self.codec().decode_text(text)
    }

    /// Read and decode a whole file. See [`Codec::read_file`].
    pub fn read_file(&self, path: &Path) -> Result<Value, Error> {
        self.codec().read_file(path)
    }

    /// Encode and atomically write a whole file. See [`Codec::write_file`].
    pub fn write_file(&self, value: &Value, path: &Path) -> Result<(), Error> {
        self.codec().write_file(value, path)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
