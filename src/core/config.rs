use crate::core::balance::{BalanceRecord, PriorityTable};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_FEED_URL: &str = "https://interview.switcheo.com/prices.json";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeedProviderConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub feed: Option<FeedProviderConfig>,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            feed: Some(FeedProviderConfig {
                url: DEFAULT_FEED_URL.to_string(),
            }),
        }
    }
}

impl ProvidersConfig {
    pub fn feed_url(&self) -> &str {
        self.feed.as_ref().map_or(DEFAULT_FEED_URL, |f| &f.url)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub balances: Vec<BalanceRecord>,
    #[serde(default)]
    pub priorities: PriorityTable,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "wallet-rates", "wallet-rates")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(
            balances = config.balances.len(),
            priorities = config.priorities.len(),
            "Successfully loaded config"
        );
        Ok(config)
    }
}
