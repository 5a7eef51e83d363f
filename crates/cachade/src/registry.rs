// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Selecting and constructing a binding from settings.

use std::future::Future;
use std::sync::Arc;

use cachade_engine::{CacheEngine, EntryOptions};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::provider::{CacheValue, OnHit};
use crate::{BareCacheProvider, CacheOptions, CacheProvider, Lookup, Result, WrappedCacheProvider};

/// Which binding to construct.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// [`BareCacheProvider`]: values stored as they are.
    #[serde(alias = "bare")]
    Bare,
    /// [`WrappedCacheProvider`]: values stored in a [`CacheEntry`](crate::CacheEntry).
    #[default]
    #[serde(alias = "wrapped")]
    Wrapped,
}

/// Either binding, chosen at runtime.
#[derive(Clone, Debug)]
pub enum AnyCacheProvider<E> {
    /// The bare binding.
    Bare(BareCacheProvider<E>),
    /// The wrapped binding.
    Wrapped(WrappedCacheProvider<E>),
}

impl<E> AnyCacheProvider<E> {
    /// Constructs the binding selected by `kind`.
    #[must_use]
    pub fn new(kind: ProviderKind, engine: E, options: CacheOptions) -> Self {
        match kind {
            ProviderKind::Bare => Self::Bare(BareCacheProvider::new(engine, options)),
            ProviderKind::Wrapped => Self::Wrapped(WrappedCacheProvider::new(engine, options)),
        }
    }

    /// Sets the name reported in telemetry.
    #[must_use]
    pub fn with_name(self, name: impl Into<Arc<str>>) -> Self {
        match self {
            Self::Bare(p) => Self::Bare(p.with_name(name)),
            Self::Wrapped(p) => Self::Wrapped(p.with_name(name)),
        }
    }

    /// Returns which binding this is.
    #[must_use]
    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::Bare(_) => ProviderKind::Bare,
            Self::Wrapped(_) => ProviderKind::Wrapped,
        }
    }

    /// Returns the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        match self {
            Self::Bare(p) => p.engine(),
            Self::Wrapped(p) => p.engine(),
        }
    }
}

impl<E: CacheEngine> CacheProvider for AnyCacheProvider<E> {
    fn name(&self) -> &str {
        match self {
            Self::Bare(p) => p.name(),
            Self::Wrapped(p) => p.name(),
        }
    }

    fn options(&self) -> &CacheOptions {
        match self {
            Self::Bare(p) => p.options(),
            Self::Wrapped(p) => p.options(),
        }
    }

    async fn get<T: CacheValue>(&self, key: &str) -> Result<Option<T>> {
        match self {
            Self::Bare(p) => p.get(key).await,
            Self::Wrapped(p) => p.get(key).await,
        }
    }

    async fn try_get<T: CacheValue>(&self, key: &str, cancel: &CancellationToken) -> Result<Lookup<T>> {
        match self {
            Self::Bare(p) => p.try_get(key, cancel).await,
            Self::Wrapped(p) => p.try_get(key, cancel).await,
        }
    }

    async fn set<T: CacheValue>(&self, key: &str, value: Option<T>, options: Option<EntryOptions>) -> Result<Option<T>> {
        match self {
            Self::Bare(p) => p.set(key, value, options).await,
            Self::Wrapped(p) => p.set(key, value, options).await,
        }
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
        match self {
            Self::Bare(p) => p.try_get_or_set_async(key, factory, options, on_hit).await,
            Self::Wrapped(p) => p.try_get_or_set_async(key, factory, options, on_hit).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match self {
            Self::Bare(p) => p.delete(key).await,
            Self::Wrapped(p) => p.delete(key).await,
        }
    }
}

/// Builds the provider described by `settings` over a fresh [`MemoryEngine`](cachade_memory::MemoryEngine).
///
/// # Examples
///
/// ```
/// use cachade::{CacheSettings, ProviderKind, build_provider};
///
/// let settings = CacheSettings {
///     provider: ProviderKind::Bare,
///     absolute_expiration_in_seconds: 600,
///     ..CacheSettings::default()
/// };
///
/// let cache = build_provider(&settings);
/// assert_eq!(cache.kind(), ProviderKind::Bare);
/// ```
#[cfg(feature = "memory")]
#[must_use]
pub fn build_provider(settings: &crate::CacheSettings) -> AnyCacheProvider<cachade_memory::MemoryEngine> {
    let mut builder = cachade_memory::MemoryEngine::builder().name(settings.name.clone());
    if let Some(capacity) = settings.max_capacity {
        builder = builder.max_capacity(capacity);
    }

    let options = CacheOptions::from_settings(settings);
    tracing::debug!(
        cache.name = %settings.name,
        cache.provider = ?settings.provider,
        cache.max_capacity = ?settings.max_capacity,
        "cache.provider_built"
    );

    AnyCacheProvider::new(settings.provider, builder.build(), options).with_name(settings.name.as_str())
}
