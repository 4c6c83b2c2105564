//! RGBA color records.

use crate::{Storable, Store};

/// A color as a four-component record.
///
/// Stored as an ordinary nested record with `red`/`green`/`blue`/`alpha`
/// fields, so any store can carry a color without the core knowing what a
/// color is. Components are conventionally in `0.0..=1.0`; nothing here
/// clamps them.
///
/// ```rust
/// use propstore_store::{Rgba, Store};
///
/// let mut store = Store::new();
/// store.set_record("tint", Some(&Rgba::new(1.0, 0.5, 0.0, 1.0)));
///
/// let tint: Rgba = store.record("tint").unwrap();
/// assert_eq!(tint.green, 0.5);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Rgba {
    /// Create a color from its components.
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Rgba {
        Rgba {
            red,
            green,
            blue,
            alpha,
        }
    }
}

impl Storable for Rgba {
    fn from_store(store: &Store) -> Option<Self> {
        Some(Rgba {
            red: store.get("red")?,
            green: store.get("green")?,
            blue: store.get("blue")?,
            alpha: store.get("alpha")?,
        })
    }

    fn write(&self, store: &mut Store) {
        store.set("red", self.red);
        store.set("green", self.green);
        store.set("blue", self.blue);
        store.set("alpha", self.alpha);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Storable;

    #[test]
    fn roundtrip_through_properties() {
        let color = Rgba::new(0.25, 0.5, 0.75, 1.0);
        assert_eq!(Rgba::from_properties(color.properties()), Some(color));
    }

    #[test]
    fn partial_record_reads_as_absent() {
        let mut properties = Rgba::default().properties();
        properties.remove("alpha");
        assert_eq!(Rgba::from_properties(properties), None);
    }

    #[test]
    fn roundtrip_as_nested_record() {
        let color = Rgba::new(1.0, 0.0, 0.0, 0.5);

        let mut store = Store::new();
        store.set_record("tint", Some(&color));
        assert_eq!(store.record::<Rgba>("tint"), Some(color));
    }
}
