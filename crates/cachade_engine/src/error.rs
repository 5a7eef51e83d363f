// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Error types for engine operations.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error from a cache engine operation.
///
/// This is an opaque error type that can wrap any underlying error from an engine
/// implementation. Use [`std::error::Error::source()`] to access the underlying
/// cause if needed.
///
/// # Example
///
/// ```
/// use cachade_engine::Error;
///
/// let error = Error::from_message("operation failed");
/// ```
#[derive(Debug, thiserror::Error)]
#[error("cache engine failure: {source}")]
pub struct Error {
    source: BoxError,
}

impl Error {
    /// Creates a new error from a message or any boxed error.
    ///
    /// # Examples
    ///
    /// ```
    /// use cachade_engine::Error;
    ///
    /// let error = Error::from_message("operation failed");
    /// assert!(error.to_string().contains("operation failed"));
    /// ```
    pub fn from_message(cause: impl Into<BoxError>) -> Self {
        Self { source: cause.into() }
    }

    /// Creates a new error wrapping a concrete error type.
    pub fn from_source(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self { source: Box::new(source) }
    }
}

/// A specialized [`Result`] type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
