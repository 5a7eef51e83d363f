// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-process engine implementation using moka.

use cachade_engine::{CacheEngine, EntryOptions, Error, StoredValue};
use moka::future::Cache;

use crate::builder::MemoryEngineBuilder;
use crate::expiry::{EntryExpiry, MemoryEntry};

/// An in-process cache engine backed by moka.
///
/// This engine provides:
/// - Concurrent access with high performance
/// - Per-entry absolute and sliding expiration
/// - Automatic eviction based on capacity
///
/// Clones share the same underlying storage.
///
/// # Examples
///
/// ```
/// use cachade_engine::{CacheEngine, EntryOptions};
/// use cachade_memory::MemoryEngine;
/// use std::sync::Arc;
/// # futures::executor::block_on(async {
///
/// let engine = MemoryEngine::new();
///
/// engine.set("key", Arc::new("value".to_string()), EntryOptions::new()).await?;
/// let value = engine.get("key").await?.expect("entry should exist");
/// assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("value"));
/// # Ok::<(), cachade_engine::Error>(())
/// # });
/// ```
#[derive(Clone)]
pub struct MemoryEngine {
    inner: Cache<String, MemoryEntry>,
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryEngine {
    /// Creates a new unbounded engine.
    ///
    /// Entries are only removed when they expire or are removed explicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new engine with a maximum capacity.
    ///
    /// Once the capacity is reached, entries will be evicted using
    /// the `TinyLFU` policy (combination of LRU eviction and LFU admission).
    #[must_use]
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::builder().max_capacity(max_capacity).build()
    }

    /// Creates a new builder for configuring an engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachade_memory::MemoryEngine;
    ///
    /// let engine = MemoryEngine::builder()
    ///     .max_capacity(1000)
    ///     .initial_capacity(64)
    ///     .name("sessions")
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> MemoryEngineBuilder {
        MemoryEngineBuilder::new()
    }

    /// Constructs a `MemoryEngine` from a builder.
    pub(crate) fn from_builder(builder: &MemoryEngineBuilder) -> Self {
        let mut moka_builder = Cache::builder().expire_after(EntryExpiry);

        if let Some(capacity) = builder.max_capacity {
            moka_builder = moka_builder
                .max_capacity(capacity)
                .weigher(|_key: &String, entry: &MemoryEntry| entry.weight());
        }

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        if let Some(name) = builder.name.as_deref() {
            moka_builder = moka_builder.name(name);
        }

        Self {
            inner: moka_builder.build(),
        }
    }

    /// Returns the engine name, if one was configured.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    /// Runs moka's pending maintenance work.
    ///
    /// Entry counts are eventually consistent; call this before relying on
    /// [`len`](CacheEngine::len) being exact.
    pub async fn run_pending_tasks(&self) {
        self.inner.run_pending_tasks().await;
    }
}

impl std::fmt::Debug for MemoryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryEngine")
            .field("name", &self.inner.name())
            .field("entries", &self.inner.entry_count())
            .finish()
    }
}

impl CacheEngine for MemoryEngine {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
        Ok(self.inner.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: StoredValue, options: EntryOptions) -> Result<(), Error> {
        self.inner.insert(key.to_owned(), MemoryEntry { value, options }).await;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.inner.invalidate(key).await;
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.inner.invalidate_all();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.inner.entry_count())
    }
}
