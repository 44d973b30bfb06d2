//! # stem-config
//!
//! Layered configuration loading for the provisioning and listing tools
//! using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STEMNET_*` prefix, `__` as separator)
//! 2. The store's conventional variables (`PUBLIC_APPWRITE_ENDPOINT`,
//!    `APPWRITE_API_KEY`, ...) and their `VITE_` aliases
//! 3. Project-level `stemnet.toml`
//! 4. User-level `~/.config/stemnet/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STEMNET_STORE__DATABASE_ID` -> `store.database_id`,
//! `STEMNET_DIAGRAM__PATH` -> `diagram.path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use stem_config::StemConfig;
//!
//! let config = StemConfig::load_with_dotenv().expect("config");
//! if config.store.is_configured() {
//!     println!("Endpoint: {}", config.store.endpoint);
//! }
//! ```

mod diagram;
mod error;
mod store;

pub use diagram::{DEFAULT_DIAGRAM_PATH, DiagramConfig};
pub use error::ConfigError;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "stemnet.toml";

/// Conventional store variables, lowest priority first. A later entry
/// overrides an earlier one that maps to the same key.
const CONVENTIONAL_ENV: &[(&str, &str)] = &[
    ("VITE_APPWRITE_ENDPOINT", "store.endpoint"),
    ("PUBLIC_APPWRITE_ENDPOINT", "store.endpoint"),
    ("APPWRITE_PROJECT_ID", "store.project_id"),
    ("VITE_APPWRITE_PROJECT_ID", "store.project_id"),
    ("PUBLIC_APPWRITE_PROJECT_ID", "store.project_id"),
    ("VITE_APPWRITE_API_KEY", "store.api_key"),
    ("APPWRITE_API_KEY", "store.api_key"),
    ("VITE_APPWRITE_DATABASE_ID", "store.database_id"),
    ("APPWRITE_DATABASE_ID", "store.database_id"),
];

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StemConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub diagram: DiagramConfig,
}

impl StemConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT read `.env` -- use [`Self::load_with_dotenv`] for that.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the working directory
    /// (or its nearest ancestor that has one).
    ///
    /// Variables already present in the process environment win over the
    /// file. A missing `.env` is not an error.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on
    /// top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Conventional store variables
        for &(name, key) in CONVENTIONAL_ENV {
            figment = figment.merge(Env::raw().only(&[name]).map(move |_| key.into()));
        }

        // Layer 4: Prefixed variables (highest priority)
        figment.merge(Env::prefixed("STEMNET_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stemnet").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = StemConfig::default();
        assert!(!config.store.is_configured());
        assert_eq!(config.diagram.path, DEFAULT_DIAGRAM_PATH);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: StemConfig = StemConfig::figment().extract()?;
            assert_eq!(config.store.database_id, "stem_network_db");
            assert_eq!(config.diagram.path, "docs/data-model.mmd");
            Ok(())
        });
    }

    #[test]
    fn conventional_env_targets_known_keys() {
        for (name, key) in CONVENTIONAL_ENV {
            assert!(key.starts_with("store."), "{name} maps outside store");
        }
    }
}
