// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ops::Deref;

/// A stored value together with a record of whether a value was present.
///
/// [`WrappedCacheProvider`](crate::WrappedCacheProvider) stores every write in a
/// `CacheEntry`, which lets a read tell "the key holds a null" apart from
/// "the key was never written".
///
/// # Examples
///
/// ```
/// use cachade::CacheEntry;
///
/// let entry = CacheEntry::new(Some(42));
/// assert!(entry.has_value());
/// assert_eq!(entry.value(), Some(&42));
///
/// let empty = CacheEntry::<i32>::empty();
/// assert!(!empty.has_value());
/// assert_eq!(empty.value(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheEntry<T> {
    value: Option<T>,
    has_value: bool,
}

impl<T> CacheEntry<T> {
    /// Creates an entry; `has_value` is `true` iff `value` is `Some`.
    pub fn new(value: Option<T>) -> Self {
        Self {
            has_value: value.is_some(),
            value,
        }
    }

    /// Creates an entry recording a stored null.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Returns `true` if a value was present when the entry was stored.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.has_value
    }

    /// Returns a reference to the stored value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Consumes the entry and returns the stored value.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> Deref for CacheEntry<T> {
    type Target = Option<T>;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> From<T> for CacheEntry<T> {
    fn from(value: T) -> Self {
        Self::new(Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_with_value_sets_has_value() {
        let entry = CacheEntry::new(Some("v"));
        assert!(entry.has_value());
        assert_eq!(entry.into_value(), Some("v"));
    }

    #[test]
    fn empty_has_no_value() {
        let entry = CacheEntry::<String>::empty();
        assert!(!entry.has_value());
        assert!(entry.is_none());
    }

    #[test]
    fn from_value_is_present() {
        let entry: CacheEntry<u8> = 7.into();
        assert!(entry.has_value());
        assert_eq!(*entry, Some(7));
    }
}
