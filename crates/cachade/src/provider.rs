// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::convert::Infallible;
use std::future::{Future, ready};

use cachade_engine::EntryOptions;
use tokio_util::sync::CancellationToken;

use crate::{CacheOptions, Lookup, Result};

/// Bounds every cached value type satisfies.
///
/// Implemented automatically for all `Clone + Send + Sync + 'static` types.
pub trait CacheValue: Clone + Send + Sync + 'static {}

impl<T: Clone + Send + Sync + 'static> CacheValue for T {}

/// Callback invoked with the cached value when a get-or-set call hits.
pub type OnHit<'a, T> = Option<&'a (dyn Fn(&T) + Send + Sync)>;

/// The caching façade.
///
/// Callers program against this trait; [`BareCacheProvider`](crate::BareCacheProvider)
/// and [`WrappedCacheProvider`](crate::WrappedCacheProvider) are its two bindings and
/// [`AnyCacheProvider`](crate::AnyCacheProvider) selects one at runtime.
///
/// Every operation is generic over the value type. Reading a key with a type other than
/// the one it was written with fails with [`Error::TypeMismatch`](crate::Error::TypeMismatch).
///
/// # Options
///
/// Writes take an `Option<EntryOptions>`. `None` uses the provider's defaults from
/// [`CacheOptions`]; `Some` replaces the defaults as a whole. An entry that ends up with
/// no expiration is pinned so it is never evicted for capacity.
///
/// # Get-or-set
///
/// The `get_or_set*` family either returns the cached value or stores a new one, never
/// both. No lock is held between the lookup and the write: concurrent misses on the same
/// key may each compute a value, and the last write wins.
///
/// # Examples
///
/// ```
/// use cachade::{CacheOptions, CacheProvider, WrappedCacheProvider};
/// use cachade_memory::MemoryEngine;
///
/// # futures::executor::block_on(async {
/// let cache = WrappedCacheProvider::new(MemoryEngine::new(), CacheOptions::new());
///
/// let value = cache.get_or_set_with("greeting", || Some("hello".to_string()), None, None).await?;
/// assert_eq!(value.as_deref(), Some("hello"));
///
/// // The factory is not called again; the cached value is returned.
/// let value = cache.get_or_set_with("greeting", || Some("ignored".to_string()), None, None).await?;
/// assert_eq!(value.as_deref(), Some("hello"));
/// # Ok::<(), cachade::Error>(())
/// # });
/// ```
pub trait CacheProvider: Send + Sync {
    /// The name attached to this provider's telemetry.
    fn name(&self) -> &str;

    /// The defaults this provider applies.
    fn options(&self) -> &CacheOptions;

    /// Returns the cached value for `key`, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails, the stored value has a different type,
    /// or a stored null is read under [`NullValueOnGet::Throw`](crate::NullValueOnGet::Throw).
    fn get<T: CacheValue>(&self, key: &str) -> impl Future<Output = Result<Option<T>>> + Send;

    /// Looks up `key`, telling a cached value apart from a missing key.
    ///
    /// Returns [`Lookup::NotFound`] without touching the engine when `cancel` is already cancelled.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    fn try_get<T: CacheValue>(&self, key: &str, cancel: &CancellationToken) -> impl Future<Output = Result<Lookup<T>>> + Send;

    /// Writes `value` under `key` and returns it, whether or not it was written.
    ///
    /// A `None` value is handled by the write policy: skipped, stored as a null, or rejected.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails or a null is written under
    /// [`NullValueOnSet::Throw`](crate::NullValueOnSet::Throw).
    fn set<T: CacheValue>(
        &self,
        key: &str,
        value: Option<T>,
        options: Option<EntryOptions>,
    ) -> impl Future<Output = Result<Option<T>>> + Send;

    /// Returns the cached value for `key`, or runs the fallible `factory` and stores its result.
    ///
    /// `on_hit` is called with the cached value on a hit that carries a value.
    ///
    /// # Errors
    ///
    /// A factory error is returned as [`Error::Factory`](crate::Error::Factory) and nothing is stored.
    /// Otherwise the errors of [`get`](Self::get) and [`set`](Self::set) apply.
    fn try_get_or_set_async<T, F, Fut, FE>(
        &self,
        key: &str,
        factory: F,
        options: Option<EntryOptions>,
        on_hit: OnHit<'_, T>,
    ) -> impl Future<Output = Result<Option<T>>> + Send
    where
        T: CacheValue,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<Option<T>, FE>> + Send,
        FE: std::error::Error + Send + Sync + 'static;

    /// Removes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails.
    fn delete(&self, key: &str) -> impl Future<Output = Result<()>> + Send;

    /// Like [`set`](Self::set), with the value produced by `factory`.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    fn set_with<T, F>(&self, key: &str, factory: F, options: Option<EntryOptions>) -> impl Future<Output = Result<Option<T>>> + Send
    where
        T: CacheValue,
        F: FnOnce() -> Option<T> + Send,
    {
        async move { self.set(key, factory(), options).await }
    }

    /// Like [`set`](Self::set), with the value produced by an async `factory`.
    ///
    /// # Errors
    ///
    /// Same as [`set`](Self::set).
    fn set_async<T, F, Fut>(&self, key: &str, factory: F, options: Option<EntryOptions>) -> impl Future<Output = Result<Option<T>>> + Send
    where
        T: CacheValue,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Option<T>> + Send,
    {
        async move {
            let value = factory().await;
            self.set(key, value, options).await
        }
    }

    /// Returns the cached value for `key`, or stores `value`.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get) and [`set`](Self::set).
    fn get_or_set<T: CacheValue>(
        &self,
        key: &str,
        value: Option<T>,
        options: Option<EntryOptions>,
        on_hit: OnHit<'_, T>,
    ) -> impl Future<Output = Result<Option<T>>> + Send {
        self.try_get_or_set_async(key, move || ready(Ok::<_, Infallible>(value)), options, on_hit)
    }

    /// Returns the cached value for `key`, or stores the value produced by `factory`.
    ///
    /// `factory` only runs on a miss.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get) and [`set`](Self::set).
    fn get_or_set_with<T, F>(
        &self,
        key: &str,
        factory: F,
        options: Option<EntryOptions>,
        on_hit: OnHit<'_, T>,
    ) -> impl Future<Output = Result<Option<T>>> + Send
    where
        T: CacheValue,
        F: FnOnce() -> Option<T> + Send,
    {
        self.try_get_or_set_async(key, move || ready(Ok::<_, Infallible>(factory())), options, on_hit)
    }

    /// Returns the cached value for `key`, or stores the value produced by an async `factory`.
    ///
    /// `factory` only runs on a miss.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get) and [`set`](Self::set).
    fn get_or_set_async<T, F, Fut>(
        &self,
        key: &str,
        factory: F,
        options: Option<EntryOptions>,
        on_hit: OnHit<'_, T>,
    ) -> impl Future<Output = Result<Option<T>>> + Send
    where
        T: CacheValue,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Option<T>> + Send,
    {
        self.try_get_or_set_async(key, move || async move { Ok::<_, Infallible>(factory().await) }, options, on_hit)
    }
}
