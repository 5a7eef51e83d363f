// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Null-value policies.

use serde::{Deserialize, Serialize};

/// What a write does with a null (`None`) value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullValueOnSet {
    /// Skip the write and hand the `None` back to the caller.
    #[default]
    #[serde(alias = "ignore")]
    Ignore,
    /// Store a null marker under the key.
    #[serde(alias = "store")]
    Store,
    /// Reject the write with [`Error::PolicyViolation`](crate::Error::PolicyViolation).
    #[serde(alias = "throw")]
    Throw,
}

/// What a read does when it finds a stored null.
///
/// Only [`WrappedCacheProvider`](crate::WrappedCacheProvider) can tell a stored null
/// from a missing key, so only it consults this policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NullValueOnGet {
    /// Treat the key as not cached.
    #[default]
    #[serde(alias = "ignore")]
    Ignore,
    /// Treat the key as not cached and remove the entry.
    #[serde(alias = "remove")]
    Remove,
    /// Fail with [`Error::PolicyViolation`](crate::Error::PolicyViolation).
    #[serde(alias = "throw")]
    Throw,
}
