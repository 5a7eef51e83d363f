// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// The outcome of [`CacheProvider::try_get`](crate::CacheProvider::try_get).
///
/// `Found(None)` is only produced by [`BareCacheProvider`](crate::BareCacheProvider)
/// for a key that holds a stored null.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The key is cached.
    Found(Option<T>),
    /// The key is not cached, or the lookup was cancelled before reaching the engine.
    NotFound,
}

impl<T> Lookup<T> {
    /// Returns `true` for [`Lookup::Found`].
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Returns the cached value, or `None` if there is none.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Found(value) => value,
            Self::NotFound => None,
        }
    }

    /// Splits the lookup into a found flag and the value.
    #[must_use]
    pub fn into_parts(self) -> (bool, Option<T>) {
        match self {
            Self::Found(value) => (true, value),
            Self::NotFound => (false, None),
        }
    }
}
