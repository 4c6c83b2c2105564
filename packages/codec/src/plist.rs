//! Property-list codec implementation.

use std::io::Cursor;
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;
use propstore_tree::Value;

use crate::{Codec, Error, Format};

/// On-disk representation of a property list, chosen by the writer.
///
/// Both representations decode through the same reader; the choice only
/// affects what `encode` emits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlistRepresentation {
    /// Human-readable XML. This is also the form `decode_text` parses.
    #[default]
    Xml,
    /// Compact binary plist.
    Binary,
}

/// A codec for Apple-style property lists.
///
/// Plists carry everything the tree does except `Null`, which has no plist
/// form and makes a tree unrepresentable. Byte blobs map to plist data
/// elements. Reads accept either representation; writes emit the one this
/// codec was built with.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlistCodec {
    pub representation: PlistRepresentation,
}

impl Codec for PlistCodec {
    fn format(&self) -> Format {
        Format::Plist
    }

    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Null => false,
            Value::Bool(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Bytes(_) => true,
            Value::Array(arr) => arr.iter().all(|v| self.accepts(v)),
            Value::Map(map) => map.values().all(|v| self.accepts(v)),
        }
    }

    fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        let plist = value_to_plist(value)?;
        let mut bytes = Vec::new();
        let result = match self.representation {
            PlistRepresentation::Xml => plist.to_writer_xml(&mut bytes),
            PlistRepresentation::Binary => plist.to_writer_binary(&mut bytes),
        };
        result.map_err(|e| Error::unrepresentable(Format::Plist, e.to_string()))?;

        Ok(Bytes::from(bytes))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
        let plist = plist::Value::from_reader(Cursor::new(bytes))
            .map_err(|e| Error::malformed(Format::Plist, e.to_string()))?;
        plist_to_value(plist)
    }
}

/// Convert a tree to `plist::Value`, refusing `Null`.
fn value_to_plist(value: &Value) -> Result<plist::Value, Error> {
    Ok(match value {
        Value::Null => {
            return Err(Error::unrepresentable(
                Format::Plist,
                "null has no plist form",
            ));
        }
        Value::Bool(b) => plist::Value::Boolean(*b),
        Value::Integer(i) => plist::Value::Integer((*i).into()),
        Value::Float(f) => plist::Value::Real(*f),
        Value::String(s) => plist::Value::String(s.clone()),
        Value::Bytes(b) => plist::Value::Data(b.clone()),
        Value::Array(arr) => {
            plist::Value::Array(arr.iter().map(value_to_plist).collect::<Result<_, _>>()?)
        }
        Value::Map(map) => {
            let mut dict = plist::Dictionary::new();
            for (key, entry) in map {
                dict.insert(key.clone(), value_to_plist(entry)?);
            }
            plist::Value::Dictionary(dict)
        }
    })
}

/// Convert a decoded `plist::Value` to a tree.
///
/// Dates become `Float` seconds since the Unix epoch (the tree has no date
/// variant and this codec never writes one). Integers beyond `i64` and
/// archiver UIDs are reported as malformed input.
fn plist_to_value(plist: plist::Value) -> Result<Value, Error> {
    Ok(match plist {
        plist::Value::Boolean(b) => Value::Bool(b),
        plist::Value::Integer(i) => match i.as_signed() {
            Some(i) => Value::Integer(i),
            None => {
                return Err(Error::malformed(
                    Format::Plist,
                    format!("integer {:?} does not fit a signed 64-bit value", i),
                ));
            }
        },
        plist::Value::Real(f) => Value::Float(f),
        plist::Value::String(s) => Value::String(s),
        plist::Value::Data(d) => Value::Bytes(d),
        plist::Value::Date(d) => {
            let time = SystemTime::from(d);
            let seconds = match time.duration_since(UNIX_EPOCH) {
                Ok(after) => after.as_secs_f64(),
                Err(before) => -before.duration().as_secs_f64(),
            };
            Value::Float(seconds)
        }
        plist::Value::Array(arr) => Value::Array(
            arr.into_iter()
                .map(plist_to_value)
                .collect::<Result<_, _>>()?,
        ),
        plist::Value::Dictionary(dict) => Value::Map(
            dict.into_iter()
                .map(|(k, v)| Ok((k, plist_to_value(v)?)))
                .collect::<Result<_, Error>>()?,
        ),
        other => {
            return Err(Error::malformed(
                Format::Plist,
                format!("unsupported plist element: {:?}", other),
            ));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml() -> PlistCodec {
        PlistCodec::default()
    }

    fn binary() -> PlistCodec {
        PlistCodec {
            representation: PlistRepresentation::Binary,
        }
    }

    fn sample() -> Value {
        let mut map = propstore_tree::Map::new();
        map.insert("name".to_string(), Value::from("Alice"));
        map.insert("age".to_string(), Value::Integer(30));
        map.insert("ratio".to_string(), Value::Float(0.25));
        map.insert("blob".to_string(), Value::Bytes(vec![0, 1, 2, 255]));
        map.insert("tags".to_string(), Value::from(vec!["a", "b"]));
        Value::Map(map)
    }

    #[test]
    fn xml_roundtrip() {
        let bytes = xml().encode(&sample()).unwrap();
        assert_eq!(xml().decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn binary_roundtrip() {
        let bytes = binary().encode(&sample()).unwrap();
        assert_eq!(binary().decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn either_representation_decodes() {
        // The reader detects the representation; the codec's own setting
        // only governs writes.
        let bytes = binary().encode(&sample()).unwrap();
        assert_eq!(xml().decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn null_is_rejected() {
        assert!(!xml().accepts(&Value::Null));
        assert!(matches!(
            xml().encode(&Value::Null),
            Err(Error::Unrepresentable { .. })
        ));

        let nested = Value::Array(vec![Value::Integer(1), Value::Null]);
        assert!(!xml().accepts(&nested));
        assert!(xml().encode(&nested).is_err());
    }

    #[test]
    fn bytes_are_accepted() {
        let value = Value::Bytes(vec![1, 2, 3]);
        assert!(xml().accepts(&value));
        let bytes = xml().encode(&value).unwrap();
        assert_eq!(xml().decode(&bytes).unwrap(), value);
    }

    #[test]
    fn malformed_input_is_an_error() {
        assert!(matches!(
            xml().decode(b"<plist>truncated"),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn xml_text_parses_natively() {
        let text = xml().encode_text(&sample()).unwrap();
        assert!(text.starts_with("<?xml"));
        assert_eq!(xml().decode_text(&text).unwrap(), sample());
    }

    #[test]
    fn binary_representation_is_not_text() {
        let result = binary().encode_text(&Value::Bytes(vec![0xfe, 0xff]));
        assert!(matches!(result, Err(Error::NotText { .. })));
    }
}

