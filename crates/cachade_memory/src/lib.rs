// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! High-performance in-process cache engine backed by moka.
//!
//! This crate provides [`MemoryEngine`], a concurrent engine using moka's `TinyLFU`
//! eviction algorithm. Use [`MemoryEngineBuilder`] to configure capacity without
//! exposing moka types directly.
//!
//! # Quick Start
//!
//! ```
//! use cachade_engine::{CacheEngine, EntryOptions};
//! use cachade_memory::MemoryEngine;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # futures::executor::block_on(async {
//! let engine = MemoryEngine::builder().max_capacity(1000).build();
//!
//! let options = EntryOptions::new().with_sliding_expiration(Duration::from_secs(60));
//! engine.set("key", Arc::new(42_i32), options).await?;
//!
//! let value = engine.get("key").await?.expect("entry should exist");
//! assert_eq!(value.downcast_ref::<i32>(), Some(&42));
//! # Ok::<(), cachade_engine::Error>(())
//! # });
//! ```
//!
//! # Features
//!
//! - **Per-entry expiration**: absolute and sliding expiration taken from each write
//! - **Capacity limits**: set a maximum entry count with automatic eviction
//! - **Priority hint**: entries marked `NeverRemove` are excluded from the capacity limit
//! - **Thread-safe**: safe for concurrent access from multiple tasks

pub mod builder;
mod expiry;
pub mod engine;

#[doc(inline)]
pub use builder::MemoryEngineBuilder;
#[doc(inline)]
pub use engine::MemoryEngine;
