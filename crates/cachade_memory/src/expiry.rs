// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Per-entry expiration policy.

use std::time::{Duration, Instant};

use cachade_engine::{CachePriority, EntryOptions, StoredValue};
use moka::Expiry;

/// The value moka stores: the caller's value plus the options it was written with.
#[derive(Clone)]
pub(crate) struct MemoryEntry {
    pub(crate) value: StoredValue,
    pub(crate) options: EntryOptions,
}

impl MemoryEntry {
    /// Weight used by the capacity policy. Pinned entries weigh nothing.
    pub(crate) fn weight(&self) -> u32 {
        match self.options.priority {
            CachePriority::Normal => 1,
            CachePriority::NeverRemove => 0,
        }
    }
}

/// Derives each entry's lifetime from its [`EntryOptions`].
///
/// A write starts the clock at the shorter of the two expirations. A read restarts the
/// sliding window, capped by what is left of the absolute lifetime since the last write.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct EntryExpiry;

impl EntryExpiry {
    fn after_read(options: &EntryOptions, since_write: Duration, current: Option<Duration>) -> Option<Duration> {
        let Some(sliding) = options.sliding_expiration else {
            return current;
        };
        match options.absolute_expiration {
            Some(absolute) => Some(sliding.min(absolute.saturating_sub(since_write))),
            None => Some(sliding),
        }
    }
}

impl Expiry<String, MemoryEntry> for EntryExpiry {
    fn expire_after_create(&self, _key: &String, value: &MemoryEntry, _created_at: Instant) -> Option<Duration> {
        value.options.initial_lifetime()
    }

    fn expire_after_read(
        &self,
        _key: &String,
        value: &MemoryEntry,
        read_at: Instant,
        duration_until_expiry: Option<Duration>,
        last_modified_at: Instant,
    ) -> Option<Duration> {
        let since_write = read_at.saturating_duration_since(last_modified_at);
        Self::after_read(&value.options, since_write, duration_until_expiry)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &MemoryEntry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        value.options.initial_lifetime()
    }
}
