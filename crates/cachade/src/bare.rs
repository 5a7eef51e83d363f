// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::future::Future;
use std::sync::Arc;

use cachade_engine::{CacheEngine, EntryOptions, StoredValue};
use tokio_util::sync::CancellationToken;

use crate::inner::{Decoded, ProviderCore};
use crate::provider::{CacheValue, OnHit};
use crate::{CacheOptions, CacheProvider, Error, Lookup, Result};

/// A provider that stores values as they are.
///
/// A stored null is indistinguishable from a stored value at the engine level, so a read
/// of a stored null is a hit returning `None`. The read-side null policy is never consulted.
///
/// Cloning is cheap; clones share the engine.
///
/// # Examples
///
/// ```
/// use cachade::{BareCacheProvider, CacheOptions, CacheProvider, NullValueOnSet};
/// use cachade_memory::MemoryEngine;
/// use tokio_util::sync::CancellationToken;
///
/// # futures::executor::block_on(async {
/// let options = CacheOptions::new().with_null_value_on_set(NullValueOnSet::Store);
/// let cache = BareCacheProvider::new(MemoryEngine::new(), options);
///
/// cache.set::<u32>("missing-user", None, None).await?;
///
/// let lookup = cache.try_get::<u32>("missing-user", &CancellationToken::new()).await?;
/// assert!(lookup.is_found());
/// assert_eq!(lookup.into_value(), None);
/// # Ok::<(), cachade::Error>(())
/// # });
/// ```
#[derive(Debug)]
pub struct BareCacheProvider<E> {
    core: ProviderCore<E>,
}

impl<E> Clone for BareCacheProvider<E> {
    fn clone(&self) -> Self {
        Self { core: self.core.clone() }
    }
}

impl<E> BareCacheProvider<E> {
    /// Creates a provider over `engine` with the given defaults.
    #[must_use]
    pub fn new(engine: E, options: CacheOptions) -> Self {
        Self {
            core: ProviderCore::new(engine, options),
        }
    }

    /// Sets the name reported in telemetry.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<Arc<str>>) -> Self {
        self.core.set_name(name);
        self
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        self.core.engine()
    }
}

fn encode<T: CacheValue>(value: Option<T>) -> StoredValue {
    Arc::new(value)
}

fn decode<T: CacheValue>(key: &str, stored: &StoredValue) -> Result<Decoded<T>> {
    stored
        .downcast_ref::<Option<T>>()
        .map(|value| Decoded::Value(value.clone()))
        .ok_or_else(|| Error::type_mismatch::<T>(key))
}

impl<E: CacheEngine> CacheProvider for BareCacheProvider<E> {
    fn name(&self) -> &str {
        self.core.name()
    }

    fn options(&self) -> &CacheOptions {
        self.core.options()
    }

    async fn get<T: CacheValue>(&self, key: &str) -> Result<Option<T>> {
        self.core.get(key, decode::<T>).await
    }

    async fn try_get<T: CacheValue>(&self, key: &str, cancel: &CancellationToken) -> Result<Lookup<T>> {
        self.core.try_get(key, cancel, decode::<T>).await
    }

    async fn set<T: CacheValue>(&self, key: &str, value: Option<T>, options: Option<EntryOptions>) -> Result<Option<T>> {
        self.core.set(key, value, options, encode::<T>).await
    }

    async fn try_get_or_set_async<T, F, Fut, FE>(
        &self,
        key: &str,
        factory: F,
        options: Option<EntryOptions>,
        on_hit: OnHit<'_, T>,
    ) -> Result<Option<T>>
    where
        T: CacheValue,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<Option<T>, FE>> + Send,
        FE: std::error::Error + Send + Sync + 'static,
    {
        self.core
            .get_or_set(key, factory, options, on_hit, encode::<T>, decode::<T>)
            .await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.core.delete(key).await
    }
}
