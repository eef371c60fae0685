//! Environment-driven configuration
//!
//! All settings are optional. `from_env` reads the process environment (after
//! `dotenvy` has merged any `.env` file); `from_lookup` takes any key lookup
//! so tests never touch the real environment.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{Result, VolumeError};
use crate::models::{Chain, TokenCatalog};

/// Default Hop subgraph root; chain endpoints are `{root}/hop-{chain}`
pub const DEFAULT_SUBGRAPH_BASE_URL: &str = "https://api.thegraph.com/subgraphs/name/hop-protocol";

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

pub const DEFAULT_COINGECKO_PLATFORM: &str = "ethereum";

/// Default delay between volume cycles in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;

pub const ENV_SUBGRAPH_BASE_URL: &str = "SUBGRAPH_BASE_URL";
pub const ENV_COINGECKO_BASE_URL: &str = "COINGECKO_BASE_URL";
pub const ENV_COINGECKO_API_KEY: &str = "COINGECKO_API_KEY";
pub const ENV_COINGECKO_PLATFORM: &str = "COINGECKO_PLATFORM";
pub const ENV_POLL_INTERVAL: &str = "VOLUME_POLL_INTERVAL_SECS";
pub const ENV_CHAINS: &str = "VOLUME_CHAINS";
pub const ENV_ENABLED_TOKENS: &str = "VOLUME_ENABLED_TOKENS";
pub const ENV_DISPLAY_PATH: &str = "VOLUME_DISPLAY_PATH";
pub const ENV_HISTORICAL_ROLLUP: &str = "HISTORICAL_ROLLUP_ENABLED";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub subgraph_base_url: String,
    pub coingecko_base_url: String,
    pub coingecko_api_key: Option<String>,
    pub coingecko_platform: String,
    pub poll_interval_secs: u64,
    pub chains: Vec<Chain>,
    pub catalog: Arc<TokenCatalog>,
    pub display_path: Option<PathBuf>,
    pub historical_rollup_enabled: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let poll_interval_secs = match get(ENV_POLL_INTERVAL) {
            Some(v) => v.parse().map_err(|e| {
                VolumeError::Config(format!("{} must be a number of seconds: {}", ENV_POLL_INTERVAL, e))
            })?,
            None => DEFAULT_POLL_INTERVAL_SECS,
        };

        let chains = match get(ENV_CHAINS) {
            Some(v) => split_list(&v)
                .iter()
                .map(|name| name.parse::<Chain>())
                .collect::<Result<Vec<_>>>()?,
            None => Chain::ALL.to_vec(),
        };

        if chains.is_empty() {
            return Err(VolumeError::Config(format!("{} lists no chains", ENV_CHAINS)));
        }

        let catalog = match get(ENV_ENABLED_TOKENS) {
            Some(v) => {
                let symbols: Vec<String> = split_list(&v).iter().map(|s| s.to_uppercase()).collect();
                TokenCatalog::hop_default().with_enabled(&symbols)?
            }
            None => TokenCatalog::hop_default(),
        };

        let historical_rollup_enabled = get(ENV_HISTORICAL_ROLLUP)
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);

        Ok(Self {
            subgraph_base_url: get(ENV_SUBGRAPH_BASE_URL)
                .unwrap_or_else(|| DEFAULT_SUBGRAPH_BASE_URL.to_string()),
            coingecko_base_url: get(ENV_COINGECKO_BASE_URL)
                .unwrap_or_else(|| DEFAULT_COINGECKO_BASE_URL.to_string()),
            coingecko_api_key: get(ENV_COINGECKO_API_KEY),
            coingecko_platform: get(ENV_COINGECKO_PLATFORM)
                .unwrap_or_else(|| DEFAULT_COINGECKO_PLATFORM.to_string()),
            poll_interval_secs,
            chains,
            catalog: Arc::new(catalog),
            display_path: get(ENV_DISPLAY_PATH).map(PathBuf::from),
            historical_rollup_enabled,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.subgraph_base_url, DEFAULT_SUBGRAPH_BASE_URL);
        assert_eq!(config.coingecko_base_url, DEFAULT_COINGECKO_BASE_URL);
        assert_eq!(config.coingecko_platform, "ethereum");
        assert!(config.coingecko_api_key.is_none());
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.chains, Chain::ALL.to_vec());
        assert_eq!(config.catalog.enabled_tokens().count(), 5);
        assert!(config.display_path.is_none());
        assert!(config.historical_rollup_enabled);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (ENV_POLL_INTERVAL, "30"),
            (ENV_CHAINS, "polygon, ethereum"),
            (ENV_ENABLED_TOKENS, "usdc,ETH"),
            (ENV_DISPLAY_PATH, "/tmp/counter.txt"),
            (ENV_COINGECKO_API_KEY, "cg-key"),
            (ENV_HISTORICAL_ROLLUP, "FALSE"),
        ])
        .unwrap();

        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.chains, vec![Chain::Polygon, Chain::Mainnet]);
        assert!(config.catalog.is_enabled("USDC"));
        assert!(config.catalog.is_enabled("ETH"));
        assert!(!config.catalog.is_enabled("DAI"));
        assert_eq!(config.display_path, Some(PathBuf::from("/tmp/counter.txt")));
        assert_eq!(config.coingecko_api_key.as_deref(), Some("cg-key"));
        assert!(!config.historical_rollup_enabled);
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = config_from(&[(ENV_POLL_INTERVAL, "  "), (ENV_COINGECKO_API_KEY, "")]).unwrap();
        assert_eq!(config.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert!(config.coingecko_api_key.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(config_from(&[(ENV_POLL_INTERVAL, "soon")]), Err(VolumeError::Config(_))));
        assert!(matches!(config_from(&[(ENV_CHAINS, "polygon,solana")]), Err(VolumeError::Config(_))));
        assert!(matches!(config_from(&[(ENV_CHAINS, ",")]), Err(VolumeError::Config(_))));
        assert!(matches!(config_from(&[(ENV_ENABLED_TOKENS, "WBTC")]), Err(VolumeError::Config(_))));
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(ENV_POLL_INTERVAL, "VOLUME_POLL_INTERVAL_SECS");
        assert_eq!(ENV_SUBGRAPH_BASE_URL, "SUBGRAPH_BASE_URL");
        assert_eq!(ENV_COINGECKO_API_KEY, "COINGECKO_API_KEY");
    }
}
