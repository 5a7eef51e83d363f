// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::time::Duration;

/// Eviction priority hint passed to the engine with every write.
///
/// Engines use it to decide what may be dropped under memory pressure. Time-based
/// expiration is governed by [`EntryOptions`] and is unaffected by the priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CachePriority {
    /// The entry may be evicted when the engine runs out of capacity.
    #[default]
    Normal,
    /// The entry should not be evicted by the engine's size policy.
    NeverRemove,
}

/// Options controlling how long a single entry lives.
///
/// When neither expiration is set the entry never expires on its own; it can still
/// be removed explicitly or by the engine's capacity policy.
///
/// # Examples
///
/// ```
/// use cachade_engine::EntryOptions;
/// use std::time::Duration;
///
/// let options = EntryOptions::new()
///     .with_absolute_expiration(Duration::from_secs(300))
///     .with_sliding_expiration(Duration::from_secs(60));
///
/// assert!(options.has_expiration());
/// assert!(!EntryOptions::new().has_expiration());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EntryOptions {
    /// Lifetime measured from the time of the write. Not reset by reads.
    pub absolute_expiration: Option<Duration>,
    /// Idle lifetime, reset on every read.
    pub sliding_expiration: Option<Duration>,
    /// Eviction priority hint.
    pub priority: CachePriority,
}

impl EntryOptions {
    /// Creates options with no expiration and normal priority.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the absolute expiration, relative to the time of the write.
    #[must_use]
    pub fn with_absolute_expiration(mut self, duration: Duration) -> Self {
        self.absolute_expiration = Some(duration);
        self
    }

    /// Sets the sliding expiration.
    #[must_use]
    pub fn with_sliding_expiration(mut self, duration: Duration) -> Self {
        self.sliding_expiration = Some(duration);
        self
    }

    /// Sets the eviction priority hint.
    #[must_use]
    pub fn with_priority(mut self, priority: CachePriority) -> Self {
        self.priority = priority;
        self
    }

    /// Returns `true` if either expiration is set.
    #[must_use]
    pub fn has_expiration(&self) -> bool {
        self.absolute_expiration.is_some() || self.sliding_expiration.is_some()
    }

    /// Returns the lifetime of a freshly written entry.
    ///
    /// This is the shorter of the two expirations, or `None` if the entry never expires.
    #[must_use]
    pub fn initial_lifetime(&self) -> Option<Duration> {
        match (self.absolute_expiration, self.sliding_expiration) {
            (Some(absolute), Some(sliding)) => Some(absolute.min(sliding)),
            (absolute, sliding) => absolute.or(sliding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_expiration() {
        let options = EntryOptions::default();
        assert_eq!(options.absolute_expiration, None);
        assert_eq!(options.sliding_expiration, None);
        assert_eq!(options.priority, CachePriority::Normal);
        assert!(!options.has_expiration());
        assert_eq!(options.initial_lifetime(), None);
    }

    #[test]
    fn initial_lifetime_picks_shorter_expiration() {
        let options = EntryOptions::new()
            .with_absolute_expiration(Duration::from_secs(10))
            .with_sliding_expiration(Duration::from_secs(3));
        assert_eq!(options.initial_lifetime(), Some(Duration::from_secs(3)));

        let options = EntryOptions::new()
            .with_absolute_expiration(Duration::from_secs(2))
            .with_sliding_expiration(Duration::from_secs(3));
        assert_eq!(options.initial_lifetime(), Some(Duration::from_secs(2)));
    }

    #[test]
    fn initial_lifetime_with_single_expiration() {
        let absolute = EntryOptions::new().with_absolute_expiration(Duration::from_secs(5));
        assert_eq!(absolute.initial_lifetime(), Some(Duration::from_secs(5)));

        let sliding = EntryOptions::new().with_sliding_expiration(Duration::from_secs(7));
        assert_eq!(sliding.initial_lifetime(), Some(Duration::from_secs(7)));
    }

    #[test]
    fn with_priority_sets_hint() {
        let options = EntryOptions::new().with_priority(CachePriority::NeverRemove);
        assert_eq!(options.priority, CachePriority::NeverRemove);
    }
}
