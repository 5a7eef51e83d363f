// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

use cachade_engine::{CachePriority, EntryOptions};

use crate::{NullValueOnGet, NullValueOnSet, settings::CacheSettings};

/// Defaults applied by a provider, computed once at construction.
///
/// # Examples
///
/// ```
/// use cachade::{CacheOptions, NullValueOnSet};
/// use cachade_engine::{CachePriority, EntryOptions};
/// use std::time::Duration;
///
/// let options = CacheOptions::new()
///     .with_entry_options(EntryOptions::new().with_absolute_expiration(Duration::from_secs(60)))
///     .with_null_value_on_set(NullValueOnSet::Store);
///
/// // Per-call options replace the defaults entirely.
/// let resolved = options.resolve(Some(EntryOptions::new()));
/// assert_eq!(resolved.absolute_expiration, None);
/// assert_eq!(resolved.priority, CachePriority::NeverRemove);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Entry options used when a call does not supply its own.
    pub entry: EntryOptions,
    /// Write-side null policy.
    pub null_value_on_set: NullValueOnSet,
    /// Read-side null policy.
    pub null_value_on_get: NullValueOnGet,
}

impl CacheOptions {
    /// Creates options with no expiration and `Ignore` null policies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default snapshot from settings. A seconds value of `0` leaves that expiration unset.
    #[must_use]
    pub fn from_settings(settings: &CacheSettings) -> Self {
        let seconds = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));
        Self {
            entry: EntryOptions {
                absolute_expiration: seconds(settings.absolute_expiration_in_seconds),
                sliding_expiration: seconds(settings.sliding_expiration_in_seconds),
                priority: CachePriority::Normal,
            },
            null_value_on_set: settings.null_value_on_set_behavior,
            null_value_on_get: settings.null_value_on_get_behavior,
        }
    }

    /// Sets the default entry options.
    #[must_use]
    pub fn with_entry_options(mut self, entry: EntryOptions) -> Self {
        self.entry = entry;
        self
    }

    /// Sets the write-side null policy.
    #[must_use]
    pub fn with_null_value_on_set(mut self, policy: NullValueOnSet) -> Self {
        self.null_value_on_set = policy;
        self
    }

    /// Sets the read-side null policy.
    #[must_use]
    pub fn with_null_value_on_get(mut self, policy: NullValueOnGet) -> Self {
        self.null_value_on_get = policy;
        self
    }

    /// Returns the options a write is actually performed with.
    ///
    /// Per-call options replace the defaults as a whole; there is no field-by-field merge.
    /// An entry left without any expiration is pinned with [`CachePriority::NeverRemove`].
    #[must_use]
    pub fn resolve(&self, options: Option<EntryOptions>) -> EntryOptions {
        let mut resolved = options.unwrap_or(self.entry);
        if !resolved.has_expiration() {
            resolved.priority = CachePriority::NeverRemove;
        }
        resolved
    }
}
