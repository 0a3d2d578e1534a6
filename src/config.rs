// SPDX-License-Identifier: GPL-3.0-only

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::{
    DexError, Result,
    query::{QueryOptions, RetryPolicy},
};

pub const APP_ID: &str = "dev.mariinkys.Dexplorer";

const CONFIG_FILE: &str = "config.ron";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DexConfig {
    pub api_base_url: String,
    pub items_per_page: usize,
    /// Upper bound for the number of cards per grid row
    pub pokemon_per_row: usize,
    pub min_card_width: f32,
    pub grid_gap: f32,
    pub type_filtering_mode: TypeFilteringMode,
    pub max_concurrent_fetches: usize,
    pub request_timeout_secs: u64,
    pub log_filter: String,
    pub stale_time_secs: u64,
    pub gc_time_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
}

impl Default for DexConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from("https://pokeapi.co/api/v2"),
            items_per_page: 30,
            pokemon_per_row: 3,
            min_card_width: 220.0,
            grid_gap: 16.0,
            type_filtering_mode: Default::default(),
            max_concurrent_fetches: 30,
            request_timeout_secs: 30,
            log_filter: String::from("info"),
            stale_time_secs: 5 * 60,
            gc_time_secs: 10 * 60,
            max_retries: 3,
            retry_base_delay_ms: 1_000,
            retry_max_delay_ms: 30_000,
        }
    }
}

/// How the selected types are matched against a Pokémon's types
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum TypeFilteringMode {
    /// The Pokémon has at least one of the selected types
    #[default]
    Inclusive,
    /// The Pokémon has every selected type
    Exclusive,
}

impl DexConfig {
    /// Default location of the config file, `None` when the platform has no config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_ID).join(CONFIG_FILE))
    }

    /// Reads and validates the config at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: DexConfig = ron::from_str(&contents)
            .map_err(|e| DexError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the config from the default location, a missing file means defaults
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| DexError::Config(e.to_string()))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.base_url()?;

        if self.items_per_page == 0 {
            return Err(DexError::Config("items_per_page must be at least 1".into()));
        }
        if self.pokemon_per_row == 0 {
            return Err(DexError::Config("pokemon_per_row must be at least 1".into()));
        }
        if self.max_concurrent_fetches == 0 {
            return Err(DexError::Config(
                "max_concurrent_fetches must be at least 1".into(),
            ));
        }

        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.api_base_url)
            .map_err(|e| DexError::Config(format!("invalid api_base_url: {e}")))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            stale_time: Duration::from_secs(self.stale_time_secs),
            gc_time: Duration::from_secs(self.gc_time_secs),
            retry: RetryPolicy {
                max_retries: self.max_retries,
                base_delay: Duration::from_millis(self.retry_base_delay_ms),
                max_delay: Duration::from_millis(self.retry_max_delay_ms),
            },
        }
    }
}
