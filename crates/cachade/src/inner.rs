// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Policy enforcement shared by both bindings.
//!
//! The bindings only differ in how a value is laid out in the engine. They hand the
//! core an encoder and a decoder; everything else (null policies, option resolution,
//! get-or-set and telemetry) lives here.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use cachade_engine::{CacheEngine, EntryOptions, StoredValue};
use tokio_util::sync::CancellationToken;

use crate::provider::{CacheValue, OnHit};
use crate::telemetry::{self, CacheActivity, CacheOperation};
use crate::{CacheOptions, Error, Lookup, NullValueOnGet, NullValueOnSet, Result};

/// Provider name used when none is configured.
pub(crate) const DEFAULT_NAME: &str = "cachade";

/// What a binding found under a key.
pub(crate) enum Decoded<T> {
    /// A cache hit carrying the value, or a bare stored null.
    Value(Option<T>),
    /// A wrapped stored null; the read policy decides what it means.
    Null,
}

pub(crate) type Encode<T> = fn(Option<T>) -> StoredValue;
pub(crate) type Decode<T> = fn(&str, &StoredValue) -> Result<Decoded<T>>;

pub(crate) struct ProviderCore<E> {
    name: Arc<str>,
    engine: Arc<E>,
    options: CacheOptions,
}

impl<E> Clone for ProviderCore<E> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            engine: Arc::clone(&self.engine),
            options: self.options,
        }
    }
}

impl<E> std::fmt::Debug for ProviderCore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderCore")
            .field("name", &self.name)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<E> ProviderCore<E> {
    pub fn new(engine: E, options: CacheOptions) -> Self {
        Self {
            name: Arc::from(DEFAULT_NAME),
            engine: Arc::new(engine),
            options,
        }
    }

    pub fn set_name(&mut self, name: impl Into<Arc<str>>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    fn record(&self, operation: CacheOperation, activity: CacheActivity, duration: Option<Duration>) {
        telemetry::record(&self.name, operation, activity, duration);
    }
}

impl<E: CacheEngine> ProviderCore<E> {
    pub async fn get<T: CacheValue>(&self, key: &str, decode: Decode<T>) -> Result<Option<T>> {
        Ok(self.lookup(key, CacheOperation::Get, decode).await?.into_value())
    }

    pub async fn try_get<T: CacheValue>(&self, key: &str, cancel: &CancellationToken, decode: Decode<T>) -> Result<Lookup<T>> {
        if cancel.is_cancelled() {
            self.record(CacheOperation::TryGet, CacheActivity::Cancelled, None);
            return Ok(Lookup::NotFound);
        }
        self.lookup(key, CacheOperation::TryGet, decode).await
    }

    pub async fn set<T: CacheValue>(
        &self,
        key: &str,
        value: Option<T>,
        options: Option<EntryOptions>,
        encode: Encode<T>,
    ) -> Result<Option<T>> {
        self.write(key, value, options, CacheOperation::Set, encode).await
    }

    pub async fn get_or_set<T, F, Fut, FE>(
        &self,
        key: &str,
        factory: F,
        options: Option<EntryOptions>,
        on_hit: OnHit<'_, T>,
        encode: Encode<T>,
        decode: Decode<T>,
    ) -> Result<Option<T>>
    where
        T: CacheValue,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = std::result::Result<Option<T>, FE>> + Send,
        FE: std::error::Error + Send + Sync + 'static,
    {
        if let Lookup::Found(value) = self.lookup(key, CacheOperation::GetOrSet, decode).await? {
            if let (Some(value), Some(on_hit)) = (&value, on_hit) {
                on_hit(value);
            }
            return Ok(value);
        }

        let value = factory().await.map_err(Error::factory)?;
        self.write(key, value, options, CacheOperation::GetOrSet, encode).await
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        self.remove(key, CacheOperation::Delete).await
    }

    async fn lookup<T: CacheValue>(&self, key: &str, operation: CacheOperation, decode: Decode<T>) -> Result<Lookup<T>> {
        let start = Instant::now();
        let stored = self.engine.get(key).await;
        let elapsed = start.elapsed();

        let stored = match stored {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                self.record(operation, CacheActivity::Miss, Some(elapsed));
                return Ok(Lookup::NotFound);
            }
            Err(e) => {
                self.record(operation, CacheActivity::Error, Some(elapsed));
                return Err(e.into());
            }
        };

        match decode(key, &stored) {
            Ok(Decoded::Value(value)) => {
                self.record(operation, CacheActivity::Hit, Some(elapsed));
                Ok(Lookup::Found(value))
            }
            Ok(Decoded::Null) => self.on_stored_null(key, operation, elapsed).await,
            Err(e) => {
                self.record(operation, CacheActivity::Error, Some(elapsed));
                Err(e)
            }
        }
    }

    async fn on_stored_null<T>(&self, key: &str, operation: CacheOperation, elapsed: Duration) -> Result<Lookup<T>> {
        match self.options.null_value_on_get {
            NullValueOnGet::Ignore => {
                self.record(operation, CacheActivity::Miss, Some(elapsed));
                Ok(Lookup::NotFound)
            }
            NullValueOnGet::Remove => {
                self.remove(key, operation).await?;
                Ok(Lookup::NotFound)
            }
            NullValueOnGet::Throw => {
                self.record(operation, CacheActivity::PolicyViolation, Some(elapsed));
                Err(Error::policy_violation(key, "get"))
            }
        }
    }

    async fn write<T: CacheValue>(
        &self,
        key: &str,
        value: Option<T>,
        options: Option<EntryOptions>,
        operation: CacheOperation,
        encode: Encode<T>,
    ) -> Result<Option<T>> {
        if value.is_none() {
            match self.options.null_value_on_set {
                NullValueOnSet::Throw => {
                    self.record(operation, CacheActivity::PolicyViolation, None);
                    return Err(Error::policy_violation(key, "set"));
                }
                NullValueOnSet::Ignore => {
                    self.record(operation, CacheActivity::Skipped, None);
                    return Ok(None);
                }
                NullValueOnSet::Store => {}
            }
        }

        let options = self.options.resolve(options);
        let start = Instant::now();
        let result = self.engine.set(key, encode(value.clone()), options).await;
        let elapsed = start.elapsed();

        match result {
            Ok(()) => {
                self.record(operation, CacheActivity::Inserted, Some(elapsed));
                Ok(value)
            }
            Err(e) => {
                self.record(operation, CacheActivity::Error, Some(elapsed));
                Err(e.into())
            }
        }
    }

    async fn remove(&self, key: &str, operation: CacheOperation) -> Result<()> {
        let start = Instant::now();
        let result = self.engine.remove(key).await;
        let elapsed = start.elapsed();

        match result {
            Ok(()) => {
                self.record(operation, CacheActivity::Removed, Some(elapsed));
                Ok(())
            }
            Err(e) => {
                self.record(operation, CacheActivity::Error, Some(elapsed));
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cachade_engine::testing::{EngineOp, MockEngine};
    use futures::executor::block_on;

    use crate::telemetry::testing::LogCapture;
    use crate::{CacheProvider, WrappedCacheProvider};

    use super::*;

    #[test]
    fn operations_emit_events() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        block_on(async {
            let cache = WrappedCacheProvider::new(MockEngine::new(), CacheOptions::new()).with_name("orders");
            cache.get::<u8>("k").await.unwrap();
            cache.set("k", Some(1_u8), None).await.unwrap();
            cache.get::<u8>("k").await.unwrap();
            cache.delete("k").await.unwrap();
        });

        capture.assert_contains("orders");
        capture.assert_contains("cache.miss");
        capture.assert_contains("cache.inserted");
        capture.assert_contains("cache.hit");
        capture.assert_contains("cache.removed");
        capture.assert_not_contains("cache.error");
    }

    #[test]
    fn engine_failure_is_logged_as_error() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let engine = MockEngine::new();
        engine.fail_when(|op| matches!(op, EngineOp::Get(_)));
        let cache = WrappedCacheProvider::new(engine, CacheOptions::new());

        let result = block_on(cache.get::<u8>("k"));
        assert!(matches!(result, Err(Error::Engine(_))));
        capture.assert_contains("ERROR");
        capture.assert_contains("cache.error");
    }

    #[test]
    fn null_write_policies_are_logged() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        block_on(async {
            let ignoring = WrappedCacheProvider::new(MockEngine::new(), CacheOptions::new());
            ignoring.set::<u8>("k", None, None).await.unwrap();

            let throwing = WrappedCacheProvider::new(
                MockEngine::new(),
                CacheOptions::new().with_null_value_on_set(NullValueOnSet::Throw),
            );
            throwing.set::<u8>("k", None, None).await.unwrap_err();
        });

        capture.assert_contains("cache.skipped");
        capture.assert_contains("WARN");
        capture.assert_contains("cache.policy_violation");
    }

    #[test]
    fn cancelled_try_get_is_logged_without_engine_call() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let engine = MockEngine::new();
        let cache = WrappedCacheProvider::new(engine.clone(), CacheOptions::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let lookup = block_on(cache.try_get::<u8>("k", &cancel)).unwrap();
        assert_eq!(lookup, Lookup::NotFound);
        assert!(engine.operations().is_empty());
        capture.assert_contains("cache.cancelled");
        capture.assert_contains("cache.try_get");
    }
}
