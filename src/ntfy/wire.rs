//! Omission predicates shared by the wire records
//!
//! The wire records borrow from the domain types, so most predicates take a
//! reference to a reference.

use std::collections::BTreeMap;
use url::Url;

pub(crate) fn is_false(value: &bool) -> bool {
    !*value
}

pub(crate) fn is_zero(value: &i8) -> bool {
    *value == 0
}

pub(crate) fn is_empty_str(value: &&str) -> bool {
    value.is_empty()
}

pub(crate) fn is_empty_slice<T>(value: &&[T]) -> bool {
    value.is_empty()
}

pub(crate) fn is_empty_map(value: &&BTreeMap<String, String>) -> bool {
    value.is_empty()
}

/// Absolute string form of an optional URL; absent renders as empty
pub(crate) fn url_str(url: Option<&Url>) -> &str {
    url.map(Url::as_str).unwrap_or_default()
}
