//! Binary codec implementation.

use bytes::Bytes;
use propstore_tree::Value;

use crate::{Codec, Error, Format};

/// A codec for the self-describing archival encoding.
///
/// The wire form is the bincode serialization of the tree's tagged serde
/// representation: every node carries its variant, so decoding needs no
/// schema. This is the only codec with no validity restriction - byte
/// blobs, the full 64-bit integer range, and non-finite floats all
/// round-trip bit-exact.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn format(&self) -> Format {
        Format::Binary
    }

    fn accepts(&self, _value: &Value) -> bool {
        true
    }

    fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        let bytes = bincode::serialize(value)
            .map_err(|e| Error::unrepresentable(Format::Binary, e.to_string()))?;
        Ok(Bytes::from(bytes))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
        bincode::deserialize(bytes).map_err(|e| Error::malformed(Format::Binary, e.to_string()))
    }
}
