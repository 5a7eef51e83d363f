// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for in-process storage engines.

use crate::{EntryOptions, Error, StoredValue};

/// Trait for cache engine implementations.
///
/// An engine is a thread-safe key-value store with per-entry expiration. The façade
/// holds no locks of its own, so every method must be safe to call concurrently.
///
/// `get`, `set`, `remove` and `clear` are required. Only `len` and `is_empty` have
/// default implementations:
/// - `len`: Returns `None` (not all engines track size)
/// - `is_empty`: Delegates to `len`
pub trait CacheEngine: Send + Sync {
    /// Looks up a key, returning `None` if it is not present or has expired.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<StoredValue>, Error>> + Send;

    /// Stores a value, replacing any previous entry for the key.
    fn set(&self, key: &str, value: StoredValue, options: EntryOptions) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes a key. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes every entry.
    fn clear(&self) -> impl Future<Output = Result<(), Error>> + Send;

    /// Returns the number of entries, if supported.
    ///
    /// Returns `None` for implementations that don't track size.
    fn len(&self) -> Option<u64> {
        None
    }

    /// Returns `true` if the engine contains no entries.
    ///
    /// Returns `None` for implementations that don't track size.
    fn is_empty(&self) -> Option<bool> {
        self.len().map(|len| len == 0)
    }
}
