// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A provider-agnostic caching façade over an in-process engine.
//!
//! The façade owns three things and delegates everything else (storage, eviction,
//! thread-safety and time-based expiration) to a [`CacheEngine`](cachade_engine::CacheEngine):
//!
//! - null-value policies on write ([`NullValueOnSet`]) and read ([`NullValueOnGet`]),
//! - resolving per-call [`EntryOptions`](cachade_engine::EntryOptions) against the provider defaults,
//! - compound get-or-set operations.
//!
//! # Bindings
//!
//! [`CacheProvider`] has two implementations. [`BareCacheProvider`] stores values as they
//! are. [`WrappedCacheProvider`] stores each value in a [`CacheEntry`] so that a stored null
//! can be distinguished from a key that was never written. [`AnyCacheProvider`] picks one
//! at runtime from a [`ProviderKind`].
//!
//! # Examples
//!
//! ## From settings
//!
//! ```
//! use cachade::{CacheProvider, CacheSettings, build_provider};
//! # futures::executor::block_on(async {
//!
//! let settings = CacheSettings {
//!     absolute_expiration_in_seconds: 300,
//!     ..CacheSettings::default()
//! };
//! let cache = build_provider(&settings);
//!
//! cache.set("answer", Some(42_u32), None).await?;
//! assert_eq!(cache.get::<u32>("answer").await?, Some(42));
//! # Ok::<(), cachade::Error>(())
//! # });
//! ```
//!
//! ## Per-call options
//!
//! ```
//! use cachade::{CacheOptions, CacheProvider, WrappedCacheProvider};
//! use cachade_engine::EntryOptions;
//! use cachade_memory::MemoryEngine;
//! use std::time::Duration;
//! # futures::executor::block_on(async {
//!
//! let cache = WrappedCacheProvider::new(MemoryEngine::new(), CacheOptions::new());
//! let options = EntryOptions::new().with_sliding_expiration(Duration::from_secs(30));
//!
//! let token = cache
//!     .get_or_set_async("token", || async { Some("abc".to_string()) }, Some(options), None)
//!     .await?;
//! assert_eq!(token.as_deref(), Some("abc"));
//! # Ok::<(), cachade::Error>(())
//! # });
//! ```
//!
//! # Telemetry
//!
//! Every operation emits a `tracing` event named `cache.event` with `cache.name`,
//! `cache.operation`, `cache.activity` and `cache.duration_ns` fields. Hits and misses are
//! logged at `DEBUG`, writes and removals at `INFO`, policy violations at `WARN` and engine
//! failures at `ERROR`.

mod bare;
mod entry;
mod error;
mod inner;
mod lookup;
mod options;
mod policy;
mod provider;
mod registry;
mod settings;
mod telemetry;
mod wrapped;

#[doc(inline)]
pub use bare::BareCacheProvider;
#[doc(inline)]
pub use entry::CacheEntry;
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use lookup::Lookup;
#[doc(inline)]
pub use options::CacheOptions;
#[doc(inline)]
pub use policy::{NullValueOnGet, NullValueOnSet};
#[doc(inline)]
pub use provider::{CacheProvider, CacheValue, OnHit};
#[cfg(feature = "memory")]
#[doc(inline)]
pub use registry::build_provider;
#[doc(inline)]
pub use registry::{AnyCacheProvider, ProviderKind};
#[doc(inline)]
pub use settings::{CacheSettings, DEFAULT_ENV_PREFIX, SettingsError, SettingsLoader};
#[doc(inline)]
pub use wrapped::WrappedCacheProvider;
