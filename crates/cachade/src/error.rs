// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for façade operations.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error from a cache façade operation.
///
/// Policy violations and type mismatches originate in the façade. Engine failures
/// are passed through untouched.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A null value was encountered where the configured policy forbids it.
    #[error("null value for key '{key}' rejected by the {operation} policy")]
    PolicyViolation {
        /// The key being read or written.
        key: String,
        /// The operation whose policy was violated, `"set"` or `"get"`.
        operation: &'static str,
    },

    /// The underlying engine failed.
    #[error(transparent)]
    Engine(#[from] cachade_engine::Error),

    /// The value stored under a key is not of the requested type.
    #[error("value stored under '{key}' is not a {expected}")]
    TypeMismatch {
        /// The key that was read.
        key: String,
        /// The type the caller asked for.
        expected: &'static str,
    },

    /// A fallible value factory returned an error. Nothing was stored.
    #[error("value factory failed")]
    Factory(#[source] BoxError),
}

impl Error {
    pub(crate) fn policy_violation(key: &str, operation: &'static str) -> Self {
        Self::PolicyViolation {
            key: key.to_owned(),
            operation,
        }
    }

    pub(crate) fn type_mismatch<T>(key: &str) -> Self {
        Self::TypeMismatch {
            key: key.to_owned(),
            expected: std::any::type_name::<T>(),
        }
    }

    /// Wraps a factory error.
    pub fn factory(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Factory(Box::new(source))
    }

    /// Returns `true` if this error is a [`PolicyViolation`](Self::PolicyViolation).
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        matches!(self, Self::PolicyViolation { .. })
    }

    /// Returns `true` if this error came from the engine.
    #[must_use]
    pub fn is_engine_failure(&self) -> bool {
        matches!(self, Self::Engine(_))
    }
}

/// A specialized [`Result`] type for façade operations.
pub type Result<T> = std::result::Result<T, Error>;
