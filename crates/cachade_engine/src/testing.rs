// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Mock engine implementation for testing.
//!
//! This module provides `MockEngine`, a `HashMap`-backed engine that records all
//! operations and supports failure injection for testing error paths. It performs
//! no expiration: options are recorded but never acted upon.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{CacheEngine, EntryOptions, Error, StoredValue};

/// Recorded engine operation with full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineOp {
    /// A get operation was performed with the given key.
    Get(String),
    /// A set operation was performed with the given key and options.
    Set {
        /// The key that was written.
        key: String,
        /// The options the entry was written with.
        options: EntryOptions,
    },
    /// A remove operation was performed with the given key.
    Remove(String),
    /// A clear operation was performed.
    Clear,
}

impl EngineOp {
    /// Returns the key this operation touched, if any.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Get(key) | Self::Remove(key) | Self::Set { key, .. } => Some(key),
            Self::Clear => None,
        }
    }
}

type FailPredicate = Box<dyn Fn(&EngineOp) -> bool + Send + Sync>;

/// A configurable mock engine for testing.
///
/// All operations are recorded for later verification, and any of them can be made
/// to fail on demand.
///
/// # Examples
///
/// ```
/// use cachade_engine::testing::{EngineOp, MockEngine};
/// use cachade_engine::{CacheEngine, EntryOptions};
/// use std::sync::Arc;
///
/// # futures::executor::block_on(async {
/// let engine = MockEngine::new();
///
/// engine.set("key", Arc::new(42_i32), EntryOptions::new()).await.unwrap();
/// let value = engine.get("key").await.unwrap().unwrap();
/// assert_eq!(value.downcast_ref::<i32>(), Some(&42));
///
/// assert_eq!(engine.operations(), vec![
///     EngineOp::Set { key: "key".to_string(), options: EntryOptions::new() },
///     EngineOp::Get("key".to_string()),
/// ]);
/// # });
/// ```
///
/// # Failure Injection
///
/// ```
/// use cachade_engine::testing::{EngineOp, MockEngine};
/// use cachade_engine::CacheEngine;
///
/// # futures::executor::block_on(async {
/// let engine = MockEngine::new();
///
/// // Fail only specific keys
/// engine.fail_when(|op| matches!(op, EngineOp::Get(k) if k == "forbidden"));
/// assert!(engine.get("forbidden").await.is_err());
/// assert!(engine.get("allowed").await.is_ok());
/// # });
/// ```
#[derive(Clone)]
pub struct MockEngine {
    data: Arc<Mutex<HashMap<String, (StoredValue, EntryOptions)>>>,
    operations: Arc<Mutex<Vec<EngineOp>>>,
    fail_when: Arc<Mutex<Option<FailPredicate>>>,
}

impl std::fmt::Debug for MockEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockEngine")
            .field("entries", &self.data.lock().len())
            .field("operations", &self.operations)
            .field("fail_when", &self.fail_when.lock().is_some())
            .finish()
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Creates a new empty mock engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_data(HashMap::new())
    }

    /// Creates a mock engine with pre-populated data, stored with default options.
    #[must_use]
    pub fn with_data(data: HashMap<String, StoredValue>) -> Self {
        let data = data
            .into_iter()
            .map(|(key, value)| (key, (value, EntryOptions::default())))
            .collect();
        Self {
            data: Arc::new(Mutex::new(data)),
            operations: Arc::new(Mutex::new(Vec::new())),
            fail_when: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the number of entries in the engine.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.data.lock().len()
    }

    /// Returns true if the engine contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    /// Returns the options the given key was last written with.
    #[must_use]
    pub fn options_for(&self, key: &str) -> Option<EntryOptions> {
        self.data.lock().get(key).map(|(_, options)| *options)
    }

    /// Sets a predicate that determines when operations should fail.
    ///
    /// The predicate receives the operation and returns `true` if it should fail.
    /// Failed operations are still recorded but leave the data untouched.
    pub fn fail_when<F>(&self, predicate: F)
    where
        F: Fn(&EngineOp) -> bool + Send + Sync + 'static,
    {
        *self.fail_when.lock() = Some(Box::new(predicate));
    }

    /// Clears the failure predicate, allowing all operations to succeed.
    pub fn clear_failures(&self) {
        *self.fail_when.lock() = None;
    }

    /// Returns a clone of all recorded operations.
    #[must_use]
    pub fn operations(&self) -> Vec<EngineOp> {
        self.operations.lock().clone()
    }

    /// Clears all recorded operations.
    pub fn clear_operations(&self) {
        self.operations.lock().clear();
    }

    /// Records `op`, returning an error if the failure predicate matches it.
    fn record(&self, op: EngineOp, failure: &'static str) -> Result<(), Error> {
        let fail = self.fail_when.lock().as_ref().is_some_and(|predicate| predicate(&op));
        self.operations.lock().push(op);
        if fail { Err(Error::from_message(failure)) } else { Ok(()) }
    }
}

impl CacheEngine for MockEngine {
    async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
        self.record(EngineOp::Get(key.to_owned()), "mock: get failed")?;
        Ok(self.data.lock().get(key).map(|(value, _)| Arc::clone(value)))
    }

    async fn set(&self, key: &str, value: StoredValue, options: EntryOptions) -> Result<(), Error> {
        self.record(
            EngineOp::Set {
                key: key.to_owned(),
                options,
            },
            "mock: set failed",
        )?;
        self.data.lock().insert(key.to_owned(), (value, options));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), Error> {
        self.record(EngineOp::Remove(key.to_owned()), "mock: remove failed")?;
        self.data.lock().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), Error> {
        self.record(EngineOp::Clear, "mock: clear failed")?;
        self.data.lock().clear();
        Ok(())
    }

    fn len(&self) -> Option<u64> {
        Some(self.data.lock().len() as u64)
    }
}
