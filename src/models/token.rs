use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Result, VolumeError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub decimals: u8,
    /// Ethereum mainnet contract, used for spot price lookups
    pub contract_address: String,
    /// CoinGecko coin id, used for historical price series
    pub coingecko_id: String,
    pub enabled: bool,
}

impl TokenInfo {
    pub fn new(symbol: &str, decimals: u8, contract_address: &str, coingecko_id: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            decimals,
            contract_address: contract_address.to_string(),
            coingecko_id: coingecko_id.to_string(),
            enabled: true,
        }
    }
}

/// Immutable symbol -> token metadata table, built once at startup
#[derive(Debug, Clone, Default)]
pub struct TokenCatalog {
    tokens: BTreeMap<String, TokenInfo>,
}

impl TokenCatalog {
    pub fn new(tokens: Vec<TokenInfo>) -> Self {
        Self {
            tokens: tokens.into_iter().map(|t| (t.symbol.clone(), t)).collect(),
        }
    }

    /// Tokens bridged by Hop
    pub fn hop_default() -> Self {
        Self::new(vec![
            TokenInfo::new("USDC", 6, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48", "usd-coin"),
            TokenInfo::new("USDT", 6, "0xdac17f958d2ee523a2206206994597c13d831ec7", "tether"),
            TokenInfo::new("DAI", 18, "0x6b175474e89094c44da98b954eedeac495271d0f", "dai"),
            TokenInfo::new("MATIC", 18, "0x7d1afa7b718fb893db30a3abc0cfc608aacfebb0", "matic-network"),
            TokenInfo::new("ETH", 18, "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2", "ethereum"),
        ])
    }

    /// Keep only the listed symbols enabled. Fails on symbols missing from the catalog.
    pub fn with_enabled(mut self, symbols: &[String]) -> Result<Self> {
        for symbol in symbols {
            if !self.tokens.contains_key(symbol) {
                return Err(VolumeError::Config(format!(
                    "Cannot enable unknown token '{}'",
                    symbol
                )));
            }
        }

        for (symbol, token) in self.tokens.iter_mut() {
            token.enabled = symbols.contains(symbol);
        }

        Ok(self)
    }

    pub fn get(&self, symbol: &str) -> Option<&TokenInfo> {
        self.tokens.get(symbol)
    }

    pub fn decimals(&self, symbol: &str) -> Result<u8> {
        self.get(symbol)
            .map(|t| t.decimals)
            .ok_or_else(|| VolumeError::UnknownToken(symbol.to_string()))
    }

    pub fn is_enabled(&self, symbol: &str) -> bool {
        self.get(symbol).map(|t| t.enabled).unwrap_or(false)
    }

    pub fn enabled_tokens(&self) -> impl Iterator<Item = &TokenInfo> {
        self.tokens.values().filter(|t| t.enabled)
    }
}
