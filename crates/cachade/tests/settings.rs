// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![allow(missing_docs, reason = "This is a test module")]
#![cfg(feature = "memory")]

//! Loading settings from files and the environment, and building providers from them.

use std::time::Duration;

use cachade::{CacheProvider, CacheSettings, NullValueOnGet, NullValueOnSet, ProviderKind, SettingsLoader, build_provider};
use figment::Jail;

#[test]
fn file_values_override_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "cache.toml",
            r#"
                absolute_expiration_in_seconds = 300
                null_value_on_set_behavior = "Store"
                null_value_on_get_behavior = "Remove"
                provider = "Bare"
                name = "catalog"
            "#,
        )?;

        let settings = SettingsLoader::new().with_file("cache.toml").load().unwrap();
        assert_eq!(settings.absolute_expiration_in_seconds, 300);
        assert_eq!(settings.sliding_expiration_in_seconds, 0);
        assert_eq!(settings.null_value_on_set_behavior, NullValueOnSet::Store);
        assert_eq!(settings.null_value_on_get_behavior, NullValueOnGet::Remove);
        assert_eq!(settings.provider, ProviderKind::Bare);
        assert_eq!(settings.max_capacity, None);
        assert_eq!(settings.name, "catalog");
        Ok(())
    });
}

#[test]
fn environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("cache.toml", "sliding_expiration_in_seconds = 30\nprovider = \"Bare\"")?;
        jail.set_env("CACHADE_SLIDING_EXPIRATION_IN_SECONDS", "90");
        jail.set_env("CACHADE_MAX_CAPACITY", "1000");

        let settings = SettingsLoader::new().with_file("cache.toml").load().unwrap();
        assert_eq!(settings.sliding_expiration_in_seconds, 90);
        assert_eq!(settings.max_capacity, Some(1000));
        assert_eq!(settings.provider, ProviderKind::Bare);
        Ok(())
    });
}

#[test]
fn custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("CACHADE_PROVIDER", "Bare");
        jail.set_env("MYAPP_CACHE_NULL_VALUE_ON_GET_BEHAVIOR", "throw");

        let settings = SettingsLoader::new().with_env_prefix("MYAPP_CACHE_").load().unwrap();
        assert_eq!(settings.null_value_on_get_behavior, NullValueOnGet::Throw);
        assert_eq!(settings.provider, ProviderKind::Wrapped);
        Ok(())
    });
}

#[test]
fn malformed_file_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file("cache.toml", "absolute_expiration_in_seconds = -5")?;

        assert!(SettingsLoader::new().with_file("cache.toml").load().is_err());
        Ok(())
    });
}

#[test]
fn loaded_settings_build_a_working_provider() {
    Jail::expect_with(|jail| {
        jail.set_env("CACHADE_ABSOLUTE_EXPIRATION_IN_SECONDS", "120");
        jail.set_env("CACHADE_NULL_VALUE_ON_SET_BEHAVIOR", "Throw");

        let settings = SettingsLoader::new().load().unwrap();
        let cache = build_provider(&settings);

        assert_eq!(cache.kind(), ProviderKind::Wrapped);
        assert_eq!(cache.options().entry.absolute_expiration, Some(Duration::from_secs(120)));

        futures::executor::block_on(async {
            cache.set("k", Some(7_u8), None).await.unwrap();
            assert_eq!(cache.get::<u8>("k").await.unwrap(), Some(7));
            assert!(cache.set::<u8>("n", None, None).await.unwrap_err().is_policy_violation());
        });
        Ok(())
    });
}

#[test]
fn default_settings() {
    let settings = CacheSettings::default();
    assert_eq!(settings.provider, ProviderKind::Wrapped);
    assert_eq!(settings.null_value_on_set_behavior, NullValueOnSet::Ignore);
    assert_eq!(settings.null_value_on_get_behavior, NullValueOnGet::Ignore);
    assert_eq!(settings.name, "cachade");
}
