//! Configuration for the catalog endpoint and HTTP client.

use std::{
   fs,
   path::{Path, PathBuf},
   sync::OnceLock,
};

use directories::BaseDirs;
use figment::{
   Figment,
   providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
   error::{Result, StoreSearchError},
   search::query::DEFAULT_BASE_URL,
   types::Category,
};

static CONFIG: OnceLock<Config> = OnceLock::new();

/// Application configuration loaded from config file and environment variables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
   pub base_url:         String,
   pub timeout_secs:     u64,
   pub user_agent:       String,
   pub default_category: Category,
}

impl Default for Config {
   fn default() -> Self {
      Self {
         base_url:         DEFAULT_BASE_URL.to_string(),
         timeout_secs:     30,
         user_agent:       concat!("storesearch/", env!("CARGO_PKG_VERSION")).to_string(),
         default_category: Category::All,
      }
   }
}

impl Config {
   pub fn load() -> Self {
      let config_path = config_file_path();
      if !config_path.exists() {
         Self::create_default_config(config_path);
      }

      Self::load_from(config_path)
   }

   /// Merges defaults, the TOML file at `path` and `STORESEARCH_*` variables.
   pub fn load_from(path: &Path) -> Self {
      Figment::from(Serialized::defaults(Self::default()))
         .merge(Toml::file(path))
         .merge(Env::prefixed("STORESEARCH_").lowercase(true))
         .extract()
         .inspect_err(|e| tracing::warn!("failed to parse config: {e}"))
         .unwrap_or_default()
   }

   fn create_default_config(path: &Path) {
      if let Some(parent) = path.parent() {
         let _ = fs::create_dir_all(parent);
      }
      let default_config = Self::default();
      if let Ok(toml) = toml::to_string_pretty(&default_config) {
         let _ = fs::write(path, toml);
      }
   }

   pub fn base_url(&self) -> Result<Url> {
      Url::parse(&self.base_url)
         .map_err(|e| StoreSearchError::Config(format!("invalid base_url {:?}: {e}", self.base_url)))
   }
}

/// Returns the global configuration instance
pub fn get() -> &'static Config {
   CONFIG.get_or_init(Config::load)
}

/// Returns the base directory for storesearch configuration
pub fn base_dir() -> &'static PathBuf {
   static ONCE: OnceLock<PathBuf> = OnceLock::new();
   ONCE.get_or_init(|| {
      BaseDirs::new()
         .map(|d| d.home_dir().join(".storesearch"))
         .or_else(|| {
            std::env::var("HOME")
               .ok()
               .map(|h| PathBuf::from(h).join(".storesearch"))
         })
         .unwrap_or_else(|| {
            std::env::current_dir()
               .unwrap_or_else(|_| PathBuf::from("."))
               .join(".storesearch")
         })
   })
}

pub fn config_file_path() -> &'static PathBuf {
   static ONCE: OnceLock<PathBuf> = OnceLock::new();
   ONCE.get_or_init(|| base_dir().join("config.toml"))
}
