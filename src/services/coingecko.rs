use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{Result, VolumeError};
use crate::models::{PriceQuotes, TokenInfo};

#[derive(Clone)]
pub struct CoinGeckoService {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    /// Asset platform the catalog contract addresses live on
    platform: String,
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

/// `/simple/token_price` body: lowercased address -> currency -> value
pub type TokenPriceResponse = HashMap<String, HashMap<String, Value>>;

impl CoinGeckoService {
    pub fn new(api_key: Option<String>, base_url: String, platform: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            platform,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url).header("accept", "application/json");
        match &self.api_key {
            Some(key) => request.header("x-cg-pro-api-key", key),
            None => request,
        }
    }

    /// Current USD price for each token, in one batched request.
    ///
    /// Never fails as a whole: a token missing from the response, a non-numeric
    /// value, or a failed request all become per-token `PriceLookup` errors.
    pub async fn fetch_token_prices(&self, tokens: &[TokenInfo]) -> PriceQuotes {
        if tokens.is_empty() {
            return PriceQuotes::new();
        }

        match self.request_token_prices(tokens).await {
            Ok(body) => parse_token_prices(tokens, &body),
            Err(e) => {
                tracing::warn!("Token price request failed: {}", e);
                tokens
                    .iter()
                    .map(|t| {
                        (
                            t.symbol.clone(),
                            Err(VolumeError::PriceLookup {
                                token: t.symbol.clone(),
                                reason: e.to_string(),
                            }),
                        )
                    })
                    .collect()
            }
        }
    }

    async fn request_token_prices(&self, tokens: &[TokenInfo]) -> Result<TokenPriceResponse> {
        let addresses = tokens
            .iter()
            .map(|t| t.contract_address.as_str())
            .collect::<Vec<_>>()
            .join(",");

        tracing::debug!("Fetching spot prices for {} tokens from CoinGecko", tokens.len());

        let url = format!("{}/simple/token_price/{}", self.base_url, self.platform);

        let response = self
            .get(&url)
            .query(&[
                ("contract_addresses", addresses.as_str()),
                ("vs_currencies", "usd"),
                ("include_market_cap", "false"),
                ("include_24hr_vol", "false"),
                ("include_24hr_change", "false"),
                ("include_last_updated_at", "false"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VolumeError::http_status("CoinGecko", status, &error_text));
        }

        Ok(response.json().await?)
    }

    /// `(timestamp_ms, price)` pairs for the trailing `days`
    pub async fn get_token_market_chart(
        &self,
        coin_id: &str,
        currency: &str,
        days: u32,
    ) -> Result<Vec<(i64, f64)>> {
        tracing::info!("Fetching market chart for {} from CoinGecko", coin_id);

        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);

        let days = days.to_string();

        let response = self
            .get(&url)
            .query(&[("vs_currency", currency), ("days", days.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(VolumeError::http_status("CoinGecko", status, &error_text));
        }

        let data: MarketChartResponse = response.json().await?;

        if let Some(last_price) = data.prices.last() {
            let last_date = DateTime::from_timestamp_millis(last_price.0)
                .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_else(|| "Invalid date".to_string());
            tracing::debug!(
                "Fetched {} prices for {}, last: {} @ {}",
                data.prices.len(),
                coin_id,
                last_price.1,
                last_date
            );
        }

        Ok(data.prices)
    }
}

/// Resolve each requested token against a `/simple/token_price` body
pub fn parse_token_prices(tokens: &[TokenInfo], body: &TokenPriceResponse) -> PriceQuotes {
    tokens
        .iter()
        .map(|token| {
            let address = token.contract_address.to_lowercase();
            let quote = match body.get(&address).and_then(|entry| entry.get("usd")) {
                Some(value) => value.as_f64().ok_or_else(|| VolumeError::PriceLookup {
                    token: token.symbol.clone(),
                    reason: format!("non-numeric price {}", value),
                }),
                None => Err(VolumeError::PriceLookup {
                    token: token.symbol.clone(),
                    reason: format!("no price for {}", address),
                }),
            };
            (token.symbol.clone(), quote)
        })
        .collect()
}
