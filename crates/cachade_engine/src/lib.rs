// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Engine contract for the `cachade` caching façade.
//!
//! This crate defines the [`CacheEngine`] trait that in-process storage engines implement,
//! along with [`EntryOptions`] describing how long an entry lives and [`Error`] for failed
//! engine operations.
//!
//! # Overview
//!
//! An engine owns storage, thread-safety, expiration and eviction. It stores type-erased
//! [`StoredValue`]s under string keys; the façade in `cachade` decides what gets written,
//! applies null-value policies and recovers the concrete value type on read.
//!
//! # Implementing an Engine
//!
//! ```
//! use cachade_engine::{CacheEngine, EntryOptions, Error, StoredValue};
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! struct SimpleEngine(RwLock<HashMap<String, StoredValue>>);
//!
//! impl CacheEngine for SimpleEngine {
//!     async fn get(&self, key: &str) -> Result<Option<StoredValue>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn set(&self, key: &str, value: StoredValue, _options: EntryOptions) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.to_owned(), value);
//!         Ok(())
//!     }
//!
//!     async fn remove(&self, key: &str) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//!
//!     async fn clear(&self) -> Result<(), Error> {
//!         self.0.write().unwrap().clear();
//!         Ok(())
//!     }
//! }
//! ```

mod engine;
pub mod error;
mod options;
#[cfg(any(feature = "test-util", test))]
pub mod testing;

use std::{any::Any, sync::Arc};

#[doc(inline)]
pub use engine::CacheEngine;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use options::{CachePriority, EntryOptions};

/// A type-erased value held by an engine.
///
/// Engines never inspect stored values; the façade downcasts them back to the
/// type requested by the caller.
pub type StoredValue = Arc<dyn Any + Send + Sync>;
