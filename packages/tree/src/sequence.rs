//! Fail-fast collection combinators.
//!
//! These two functions are the single point of truth for "a batch decode is
//! valid only if every member is valid". Every array and dictionary record
//! accessor in the store layer is built by composing an element-wise decode
//! with one of them.

use std::collections::BTreeMap;

/// Lift a list of optional values into an optional list.
///
/// Returns the list with every option unwrapped, in the original order, if
/// and only if no element is absent. A single absent element voids the
/// whole list - no partial results, no silent dropping.
///
/// ```rust
/// use propstore_tree::sequence;
///
/// assert_eq!(sequence(vec![Some(1), Some(2)]), Some(vec![1, 2]));
/// assert_eq!(sequence(vec![Some(1), None, Some(3)]), None);
/// ```
pub fn sequence<T>(items: Vec<Option<T>>) -> Option<Vec<T>> {
    items.into_iter().collect()
}

/// Lift a string-keyed map of optional values into an optional map.
///
/// Identical rule to [`sequence`], with key identity preserved: the result
/// is present only if every entry's value is present.
pub fn sequence_map<T>(items: BTreeMap<String, Option<T>>) -> Option<BTreeMap<String, T>> {
    items
        .into_iter()
        .map(|(key, value)| value.map(|value| (key, value)))
        .collect()
}
