// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring in-process engines.
//!
//! This module provides a builder API for `MemoryEngine` that abstracts
//! the underlying moka configuration, providing a stable API surface
//! without exposing moka's types.

use crate::engine::MemoryEngine;

/// Builder for configuring a `MemoryEngine`.
///
/// Expiration is not configured here: every write carries its own
/// [`EntryOptions`](cachade_engine::EntryOptions).
///
/// # Examples
///
/// ```
/// use cachade_memory::MemoryEngine;
///
/// let engine = MemoryEngine::builder()
///     .max_capacity(1000)
///     .initial_capacity(100)
///     .name("my-cache")
///     .build();
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryEngineBuilder {
    pub(crate) max_capacity: Option<u64>,
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) name: Option<String>,
}

impl MemoryEngineBuilder {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration creates an unbounded engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of entries.
    ///
    /// Once the capacity is reached, entries will be evicted to make room
    /// for new entries using the `TinyLFU` eviction policy. Entries written with
    /// [`CachePriority::NeverRemove`](cachade_engine::CachePriority::NeverRemove)
    /// are not counted.
    ///
    /// If not set, the engine is unbounded (limited only by available memory).
    #[must_use]
    pub fn max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = Some(capacity);
        self
    }

    /// Sets the initial capacity (pre-allocation hint) for the engine.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Sets a name for the engine.
    ///
    /// This name may appear in logs or debugging output.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Builds the configured `MemoryEngine`.
    #[must_use]
    pub fn build(self) -> MemoryEngine {
        MemoryEngine::from_builder(&self)
    }
}
