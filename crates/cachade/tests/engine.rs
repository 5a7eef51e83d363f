// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "This is a test module")]

//! How the façade drives the engine, observed through `MockEngine`.

use std::time::Duration;

use cachade::{AnyCacheProvider, CacheOptions, CacheProvider, Error, NullValueOnGet, NullValueOnSet, ProviderKind};
use cachade_engine::testing::{EngineOp, MockEngine};
use cachade_engine::{CachePriority, EntryOptions};
use rstest::rstest;
use tokio_util::sync::CancellationToken;

type TestResult = Result<(), Error>;

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    futures::executor::block_on(f)
}

fn provider(kind: ProviderKind, engine: &MockEngine, options: CacheOptions) -> AnyCacheProvider<MockEngine> {
    AnyCacheProvider::new(kind, engine.clone(), options)
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn engine_get_failure_is_propagated(#[case] kind: ProviderKind) {
    let engine = MockEngine::new();
    engine.fail_when(|op| matches!(op, EngineOp::Get(_)));
    let cache = provider(kind, &engine, CacheOptions::new());

    block_on(async {
        assert!(matches!(cache.get::<u8>("k").await, Err(Error::Engine(_))));
        assert!(matches!(
            cache.try_get::<u8>("k", &CancellationToken::new()).await,
            Err(Error::Engine(_))
        ));
        assert!(matches!(
            cache.get_or_set("k", Some(1_u8), None, None).await,
            Err(Error::Engine(_))
        ));
    });

    // The failed lookup stops get-or-set before any write.
    assert!(!engine.operations().iter().any(|op| matches!(op, EngineOp::Set { .. })));
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn engine_set_and_remove_failures_are_propagated(#[case] kind: ProviderKind) {
    let engine = MockEngine::new();
    engine.fail_when(|op| matches!(op, EngineOp::Set { .. } | EngineOp::Remove(_)));
    let cache = provider(kind, &engine, CacheOptions::new());

    block_on(async {
        let error = cache.set("k", Some(1_u8), None).await.unwrap_err();
        assert!(error.is_engine_failure());
        assert!(cache.delete("k").await.unwrap_err().is_engine_failure());
    });
    assert_eq!(engine.entry_count(), 0);
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn cancelled_try_get_does_not_touch_engine(#[case] kind: ProviderKind) -> TestResult {
    let engine = MockEngine::new();
    let cache = provider(kind, &engine, CacheOptions::new());
    block_on(cache.set("k", Some(1_u8), None))?;
    engine.clear_operations();

    let cancel = CancellationToken::new();
    cancel.cancel();
    let lookup = block_on(cache.try_get::<u8>("k", &cancel))?;

    assert!(!lookup.is_found());
    assert!(engine.operations().is_empty());
    Ok(())
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn get_or_set_performs_one_lookup_and_one_write_on_miss(#[case] kind: ProviderKind) -> TestResult {
    let engine = MockEngine::new();
    let cache = provider(kind, &engine, CacheOptions::new());

    block_on(cache.get_or_set("k", Some(1_u8), None, None))?;
    block_on(cache.get_or_set("k", Some(2_u8), None, None))?;

    let ops = engine.operations();
    assert_eq!(ops.len(), 3);
    assert_eq!(ops[0], EngineOp::Get("k".to_owned()));
    assert!(matches!(&ops[1], EngineOp::Set { key, .. } if key == "k"));
    assert_eq!(ops[2], EngineOp::Get("k".to_owned()));
    Ok(())
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn default_options_are_used_when_none_given(#[case] kind: ProviderKind) -> TestResult {
    let defaults = EntryOptions::new().with_absolute_expiration(Duration::from_secs(60));
    let engine = MockEngine::new();
    let cache = provider(kind, &engine, CacheOptions::new().with_entry_options(defaults));

    block_on(cache.set("k", Some(1_u8), None))?;
    assert_eq!(engine.options_for("k"), Some(defaults));
    Ok(())
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn explicit_options_replace_defaults(#[case] kind: ProviderKind) -> TestResult {
    let defaults = EntryOptions::new()
        .with_absolute_expiration(Duration::from_secs(60))
        .with_sliding_expiration(Duration::from_secs(10));
    let engine = MockEngine::new();
    let cache = provider(kind, &engine, CacheOptions::new().with_entry_options(defaults));

    let explicit = EntryOptions::new().with_sliding_expiration(Duration::from_secs(5));
    block_on(cache.set("k", Some(1_u8), Some(explicit)))?;

    let written = engine.options_for("k").expect("entry should be written");
    assert_eq!(written.absolute_expiration, None);
    assert_eq!(written.sliding_expiration, Some(Duration::from_secs(5)));
    assert_eq!(written.priority, CachePriority::Normal);
    Ok(())
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn entries_without_expiration_are_pinned(#[case] kind: ProviderKind) -> TestResult {
    let engine = MockEngine::new();
    let cache = provider(kind, &engine, CacheOptions::new());

    block_on(cache.set("defaulted", Some(1_u8), None))?;
    block_on(cache.set("explicit", Some(1_u8), Some(EntryOptions::new())))?;

    assert_eq!(engine.options_for("defaulted").map(|o| o.priority), Some(CachePriority::NeverRemove));
    assert_eq!(engine.options_for("explicit").map(|o| o.priority), Some(CachePriority::NeverRemove));
    Ok(())
}

#[rstest]
#[case::bare(ProviderKind::Bare)]
#[case::wrapped(ProviderKind::Wrapped)]
fn rejected_and_skipped_nulls_never_reach_engine(#[case] kind: ProviderKind) {
    for policy in [NullValueOnSet::Ignore, NullValueOnSet::Throw] {
        let engine = MockEngine::new();
        let cache = provider(kind, &engine, CacheOptions::new().with_null_value_on_set(policy));

        let _ = block_on(cache.set::<u8>("k", None, None));
        assert!(engine.operations().is_empty(), "{policy:?} wrote to the engine");
    }
}

#[test]
fn remove_on_get_issues_engine_remove() -> TestResult {
    let engine = MockEngine::new();
    let options = CacheOptions::new()
        .with_null_value_on_set(NullValueOnSet::Store)
        .with_null_value_on_get(NullValueOnGet::Remove);
    let cache = provider(ProviderKind::Wrapped, &engine, options);

    block_on(cache.set::<u8>("k", None, None))?;
    engine.clear_operations();

    assert_eq!(block_on(cache.get::<u8>("k"))?, None);
    assert_eq!(
        engine.operations(),
        vec![EngineOp::Get("k".to_owned()), EngineOp::Remove("k".to_owned())]
    );
    Ok(())
}
