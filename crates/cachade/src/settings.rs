// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cache settings and their loader.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::{NullValueOnGet, NullValueOnSet, ProviderKind};

/// Environment variable prefix used by [`SettingsLoader`] unless overridden.
pub const DEFAULT_ENV_PREFIX: &str = "CACHADE_";

/// Global cache settings, read once at startup.
///
/// Missing fields take their defaults. Expirations are whole seconds; `0` leaves the
/// expiration unset.
///
/// ```toml
/// absolute_expiration_in_seconds = 300
/// sliding_expiration_in_seconds = 60
/// null_value_on_set_behavior = "Store"
/// null_value_on_get_behavior = "Remove"
/// provider = "Wrapped"
/// max_capacity = 10000
/// name = "catalog"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Lifetime of an entry from its last write.
    pub absolute_expiration_in_seconds: u64,
    /// Idle lifetime of an entry, reset on each read.
    pub sliding_expiration_in_seconds: u64,
    /// Write-side null policy.
    pub null_value_on_set_behavior: NullValueOnSet,
    /// Read-side null policy.
    pub null_value_on_get_behavior: NullValueOnGet,
    /// Which binding to construct.
    pub provider: ProviderKind,
    /// Entry limit of the engine; unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<u64>,
    /// Name attached to telemetry and the engine.
    pub name: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            absolute_expiration_in_seconds: 0,
            sliding_expiration_in_seconds: 0,
            null_value_on_set_behavior: NullValueOnSet::default(),
            null_value_on_get_behavior: NullValueOnGet::default(),
            provider: ProviderKind::default(),
            max_capacity: None,
            name: crate::inner::DEFAULT_NAME.to_owned(),
        }
    }
}

/// Settings could not be loaded.
#[derive(Debug, thiserror::Error)]
#[error("failed to load cache settings: {source}")]
pub struct SettingsError {
    #[source]
    source: Box<figment::Error>,
}

impl From<figment::Error> for SettingsError {
    fn from(source: figment::Error) -> Self {
        Self { source: Box::new(source) }
    }
}

/// Layers [`CacheSettings`] from defaults, an optional TOML file and the environment.
///
/// Later sources win:
/// 1. `CacheSettings::default()`
/// 2. the TOML file, if one was given and it exists
/// 3. environment variables with the prefix, e.g. `CACHADE_SLIDING_EXPIRATION_IN_SECONDS`
///
/// # Examples
///
/// ```no_run
/// use cachade::{SettingsLoader, build_provider};
///
/// let settings = SettingsLoader::new().with_file("cache.toml").load()?;
/// let cache = build_provider(&settings);
/// # Ok::<(), cachade::SettingsError>(())
/// ```
#[derive(Clone, Debug)]
pub struct SettingsLoader {
    path: Option<PathBuf>,
    env_prefix: String,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Creates a loader reading only defaults and `CACHADE_*` variables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_owned(),
        }
    }

    /// Reads the given TOML file, if it exists.
    #[must_use]
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the environment variable prefix.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Loads the settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a source holds a value of the wrong shape, such as an unknown
    /// policy name or a negative expiration.
    pub fn load(&self) -> Result<CacheSettings, SettingsError> {
        let mut figment = Figment::new().merge(Serialized::defaults(CacheSettings::default()));

        if let Some(path) = &self.path {
            if path.exists() {
                tracing::debug!(path = %path.display(), "cache.settings_file_loaded");
                figment = figment.merge(Toml::file(path));
            } else {
                tracing::debug!(path = %path.display(), "cache.settings_file_missing");
            }
        }

        let settings: CacheSettings = figment.merge(Env::prefixed(&self.env_prefix)).extract()?;
        Ok(settings)
    }
}
