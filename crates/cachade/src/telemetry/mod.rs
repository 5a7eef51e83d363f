// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Structured logging for façade operations.
//!
//! Every operation emits a single `tracing` event named `cache.event` carrying the
//! provider name, the operation, what happened, and the engine round trip time when
//! there was one. Filtering is left to whatever subscriber the application installs.

use std::time::Duration;

use tracing::Level;

#[cfg(test)]
pub(crate) mod attributes;
#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheOperation {
    Get,
    TryGet,
    Set,
    GetOrSet,
    Delete,
}

impl CacheOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "cache.get",
            Self::TryGet => "cache.try_get",
            Self::Set => "cache.set",
            Self::GetOrSet => "cache.get_or_set",
            Self::Delete => "cache.delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CacheActivity {
    Hit,
    Miss,
    Inserted,
    Skipped,
    Removed,
    Cancelled,
    PolicyViolation,
    Error,
}

impl CacheActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "cache.hit",
            Self::Miss => "cache.miss",
            Self::Inserted => "cache.inserted",
            Self::Skipped => "cache.skipped",
            Self::Removed => "cache.removed",
            Self::Cancelled => "cache.cancelled",
            Self::PolicyViolation => "cache.policy_violation",
            Self::Error => "cache.error",
        }
    }

    pub fn level(self) -> Level {
        match self {
            Self::Hit | Self::Miss | Self::Cancelled => Level::DEBUG,
            Self::Inserted | Self::Skipped | Self::Removed => Level::INFO,
            Self::PolicyViolation => Level::WARN,
            Self::Error => Level::ERROR,
        }
    }
}

/// Emits one `cache.event`.
pub(crate) fn record(cache_name: &str, operation: CacheOperation, activity: CacheActivity, duration: Option<Duration>) {
    let op = operation.as_str();
    let ev = activity.as_str();
    let duration_ns = duration.map(|d| d.as_nanos());

    // Tracing level must be constant, so we use a macro to select the appropriate level.
    // Field names must match constants in attributes.rs - see attribute_names_match_tracing_fields test.
    macro_rules! emit_event {
        ($level:ident) => {
            tracing::$level!(
                cache.name = cache_name,
                cache.operation = op,
                cache.activity = ev,
                cache.duration_ns = ?duration_ns,
                "cache.event"
            )
        };
    }

    match activity.level() {
        Level::ERROR => emit_event!(error),
        Level::WARN => emit_event!(warn),
        Level::INFO => emit_event!(info),
        _ => emit_event!(debug),
    }
}
