//! Propstore Store: Typed Access and the Storable Contract
//!
//! This layer gives the property tree its call-site surface:
//!
//! - [`Store`]: one string-keyed map with typed getters and setters over
//!   it - scalars through [`FromValue`]/[`IntoValue`], collections with
//!   all-or-nothing decode, sub-stores for nesting, and file/text/data
//!   round-trips through the codec layer
//! - [`Storable`]: the contract a domain record implements to get file
//!   I/O, string and data conversion, nested composition, and list support
//!   derived for free
//!
//! # Example
//!
//! ```rust
//! use propstore_store::{Storable, Store};
//!
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Storable for Server {
//!     fn from_store(store: &Store) -> Option<Self> {
//!         Some(Server {
//!             host: store.get("host")?,
//!             port: store.get("port")?,
//!         })
//!     }
//!
//!     fn write(&self, store: &mut Store) {
//!         store.set("host", self.host.clone());
//!         store.set("port", self.port);
//!     }
//! }
//!
//! let original = Server { host: "localhost".into(), port: 8080 };
//! let decoded = Server::from_properties(original.properties()).unwrap();
//! assert_eq!(decoded.port, 8080);
//! ```

mod color;
mod convert;
mod storable;
mod store;

pub use color::Rgba;
pub use convert::{FromValue, IntoValue};
pub use storable::{Storable, StorableList};
pub use store::Store;

// Re-export the layers below for convenience
pub use propstore_codec::{Codec, Error, Format};
pub use propstore_tree::{sequence, sequence_map, Map, Value};
