//! The Codec trait: tree to bytes and back, plus text and file round-trips.

use std::fs;
use std::io::Write;
use std::path::Path;

use bytes::Bytes;
use propstore_tree::Value;

use crate::{Error, Format};

/// Convert between a [`Value`] tree and one wire representation.
///
/// Implementations are stateless and safe to share across threads; the
/// instances behind [`Format::codec`] live for the whole process.
///
/// # Contract
///
/// - `encode` refuses a tree the format cannot represent
///   ([`Error::Unrepresentable`]) rather than emitting corrupt output.
/// - `decode` fails on malformed input ([`Error::Malformed`]) and never
///   produces a partial tree.
/// - `write_file` replaces the whole file atomically: a concurrent reader
///   observes either the old content or the new, never a truncated file.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&dyn Codec`.
pub trait Codec: Send + Sync {
    /// The format this codec implements.
    fn format(&self) -> Format;

    /// Encode a tree into wire bytes.
    fn encode(&self, value: &Value) -> Result<Bytes, Error>;

    /// Decode wire bytes into a tree.
    fn decode(&self, bytes: &[u8]) -> Result<Value, Error>;

    /// Check whether every node of `value` is representable in this
    /// format. `encode` applies the same rule.
    fn accepts(&self, value: &Value) -> bool;

    /// Encode a tree and re-read the bytes as UTF-8 text.
    ///
    /// Fails with [`Error::NotText`] for formats whose wire form is not
    /// text (the binary codec, binary plists).
    fn encode_text(&self, value: &Value) -> Result<String, Error> {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| Error::NotText {
            format: self.format(),
        })
    }

    /// Decode a tree from text.
    ///
    /// The default treats the text as UTF-8 wire bytes, which is exact for
    /// the text formats and a best effort for the rest.
    fn decode_text(&self, text: &str) -> Result<Value, Error> {
        self.decode(text.as_bytes())
    }

    /// Read and decode a whole file.
    fn read_file(&self, path: &Path) -> Result<Value, Error> {
        log::debug!("reading {} as {}", path.display(), self.format());
        let bytes = fs::read(path)?;
        self.decode(&bytes)
    }

    /// Encode and write a whole file, atomically.
    ///
    /// The bytes go to a temporary file in the destination directory which
    /// is then renamed over the target, so a failed write never leaves a
    /// truncated file behind.
    fn write_file(&self, value: &Value, path: &Path) -> Result<(), Error> {
        let bytes = self.encode(value)?;
        log::debug!(
            "writing {} bytes to {} as {}",
            bytes.len(),
            path.display(),
            self.format()
        );

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}
