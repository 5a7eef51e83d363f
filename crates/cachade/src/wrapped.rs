// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::future::Future;
use std::sync::Arc;

use cachade_engine::{CacheEngine, EntryOptions, StoredValue};
use tokio_util::sync::CancellationToken;

use crate::inner::{Decoded, ProviderCore};
use crate::provider::{CacheValue, OnHit};
use crate::{CacheEntry, CacheOptions, CacheProvider, Error, Lookup, Result};

/// A provider that stores every value inside a [`CacheEntry`].
///
/// The wrapper records whether a value was present, so a stored null can be told apart
/// from a missing key. On read, a stored null is resolved by the
/// [`NullValueOnGet`](crate::NullValueOnGet) policy: it is treated as a miss, removed,
/// or reported as an error.
///
/// Cloning is cheap; clones share the engine.
///
/// # Examples
///
/// ```
/// use cachade::{CacheOptions, CacheProvider, Error, NullValueOnGet, NullValueOnSet, WrappedCacheProvider};
/// use cachade_memory::MemoryEngine;
///
/// # futures::executor::block_on(async {
/// let options = CacheOptions::new()
///     .with_null_value_on_set(NullValueOnSet::Store)
///     .with_null_value_on_get(NullValueOnGet::Throw);
/// let cache = WrappedCacheProvider::new(MemoryEngine::new(), options);
///
/// cache.set::<u32>("missing-user", None, None).await?;
///
/// let error = cache.get::<u32>("missing-user").await.unwrap_err();
/// assert!(matches!(error, Error::PolicyViolation { .. }));
/// # Ok::<(), cachade::Error>(())
/// # });
/// ```
#[derive(Debug)]
pub struct WrappedCacheProvider<E> {
    core: ProviderCore<E>,
}

impl<E> Clone for WrappedCacheProvider<E> {
    fn clone(&self) -> Self {
        Self { core: self.core.clone() }
    }
}

impl<E> WrappedCacheProvider<E> {
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
    Arc::new(CacheEntry::new(value))
}

fn decode<T: CacheValue>(key: &str, stored: &StoredValue) -> Result<Decoded<T>> {
    let entry = stored
        .downcast_ref::<CacheEntry<T>>()
        .ok_or_else(|| Error::type_mismatch::<T>(key))?;

    if entry.has_value() {
        Ok(Decoded::Value(entry.value().cloned()))
    } else {
        Ok(Decoded::Null)
    }
}

impl<E: CacheEngine> CacheProvider for WrappedCacheProvider<E> {
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
