//! JSON codec implementation.

use bytes::Bytes;
use propstore_tree::Value;

use crate::{Codec, Error, Format};

/// A codec for JSON text.
///
/// Restricted to the JSON data model: byte blobs and non-finite floats
/// make the tree unrepresentable, and encoding refuses them up front
/// instead of transforming them behind the caller's back.
///
/// # Example
///
/// ```rust
/// use propstore_codec::{Codec, JsonCodec};
/// use propstore_tree::Value;
///
/// let codec = JsonCodec { pretty: false };
/// let bytes = codec.encode(&Value::from("hello")).unwrap();
/// assert_eq!(codec.decode(&bytes).unwrap(), Value::from("hello"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    /// Emit indented output. Output-only; has no effect on what decodes.
    pub pretty: bool,
}

impl JsonCodec {
    /// A codec that emits compact, single-line output.
    pub const fn compact() -> Self {
        JsonCodec { pretty: false }
    }
}

impl Codec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn accepts(&self, value: &Value) -> bool {
        match value {
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::String(_) => true,
            Value::Float(f) => f.is_finite(),
            Value::Bytes(_) => false,
            Value::Array(arr) => arr.iter().all(|v| self.accepts(v)),
            Value::Map(map) => map.values().all(|v| self.accepts(v)),
        }
    }

    fn encode(&self, value: &Value) -> Result<Bytes, Error> {
        let json = value_to_json(value)?;
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&json)
        } else {
            serde_json::to_vec(&json)
        }
        .map_err(|e| Error::unrepresentable(Format::Json, e.to_string()))?;

        Ok(Bytes::from(bytes))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, Error> {
        let json: serde_json::Value = serde_json::from_slice(bytes)
            .map_err(|e| Error::malformed(Format::Json, e.to_string()))?;
        Ok(json_to_value(json))
    }
}

/// Convert a tree to `serde_json::Value`, refusing anything JSON can't say.
fn value_to_json(value: &Value) -> Result<serde_json::Value, Error> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .ok_or_else(|| {
                Error::unrepresentable(Format::Json, format!("non-finite number {}", f))
            })?,
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Bytes(_) => {
            return Err(Error::unrepresentable(
                Format::Json,
                "json has no byte blob form",
            ));
        }
        Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(value_to_json).collect::<Result<_, _>>()?)
        }
        Value::Map(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| Ok((k.clone(), value_to_json(v)?)))
                .collect::<Result<_, Error>>()?,
        ),
    })
}

/// Convert `serde_json::Value` to a tree. Total: every JSON value has a
/// tree form. Integral numbers become `Integer`, the rest `Float`.
fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Value::Float(f)
            } else {
                // u64 beyond i64::MAX
                Value::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(arr) => Value::Array(arr.into_iter().map(json_to_value).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| (k, json_to_value(v)))
                .collect(),
        ),
    }
}
