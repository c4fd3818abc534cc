//! Engine configuration.
//!
//! Read from the environment (after `.env` is applied by the binary):
//!
//! | variable                 | default     |
//! |--------------------------|-------------|
//! | `ANATOMY_DATA_PATH`      | `data/json` |
//! | `ANATOMY_MOD_PATHS`      | none (comma-separated, loaded in order) |
//! | `ANATOMY_LOCALE_CATALOG` | none        |
//! | `ANATOMY_STRICT`         | `false`     |

use std::path::PathBuf;

use crate::infrastructure::content_sources::DirectorySource;

const DEFAULT_DATA_PATH: &str = "data/json";

/// Tag of the base game content source.
pub const BASE_SOURCE_TAG: &str = "base";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Base content directory.
    pub data_path: PathBuf,
    /// Mod directories, applied over the base content in order.
    pub mod_paths: Vec<PathBuf>,
    /// Optional JSON translation catalog.
    pub locale_catalog: Option<PathBuf>,
    /// Treat load errors and consistency issues as fatal.
    pub strict: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            mod_paths: Vec::new(),
            locale_catalog: None,
            strict: false,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup (the environment in production).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_path = non_empty("ANATOMY_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let mod_paths = non_empty("ANATOMY_MOD_PATHS")
            .map(|paths| {
                paths
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();
        let locale_catalog = non_empty("ANATOMY_LOCALE_CATALOG").map(PathBuf::from);
        let strict = non_empty("ANATOMY_STRICT")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(defaults.strict);

        Self {
            data_path,
            mod_paths,
            locale_catalog,
            strict,
        }
    }

    /// Content sources in load order: base first, then each mod.
    pub fn sources(&self) -> Vec<DirectorySource> {
        std::iter::once(DirectorySource::new(&self.data_path, BASE_SOURCE_TAG))
            .chain(self.mod_paths.iter().map(DirectorySource::named_after_dir))
            .collect()
    }
}
