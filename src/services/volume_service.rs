use futures_util::future::try_join_all;
use std::collections::BTreeMap;

use crate::config::AppConfig;
use crate::error::Result;
use crate::models::{Chain, PriceMap, TokenInfo, VolumeSummary};
use crate::services::coingecko::CoinGeckoService;
use crate::services::subgraph::SubgraphClient;
use crate::services::volume_aggregator::VolumeAggregator;

/// Fetch -> price -> aggregate pipeline for the bridge volume counter
#[derive(Clone)]
pub struct VolumeService {
    subgraph: SubgraphClient,
    coingecko: CoinGeckoService,
    aggregator: VolumeAggregator,
    chains: Vec<Chain>,
}

impl VolumeService {
    pub fn new(
        subgraph: SubgraphClient,
        coingecko: CoinGeckoService,
        aggregator: VolumeAggregator,
        chains: Vec<Chain>,
    ) -> Self {
        Self {
            subgraph,
            coingecko,
            aggregator,
            chains,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            SubgraphClient::new(config.subgraph_base_url.clone()),
            CoinGeckoService::new(
                config.coingecko_api_key.clone(),
                config.coingecko_base_url.clone(),
                config.coingecko_platform.clone(),
            ),
            VolumeAggregator::new(config.catalog.clone()),
            config.chains.clone(),
        )
    }

    pub fn subgraph(&self) -> &SubgraphClient {
        &self.subgraph
    }

    pub fn coingecko(&self) -> &CoinGeckoService {
        &self.coingecko
    }

    pub fn aggregator(&self) -> &VolumeAggregator {
        &self.aggregator
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Spot prices for every enabled token, with fallbacks applied
    pub async fn fetch_prices(&self) -> PriceMap {
        let tokens: Vec<TokenInfo> = self.aggregator.catalog().enabled_tokens().cloned().collect();
        PriceMap::from_quotes(self.coingecko.fetch_token_prices(&tokens).await)
    }

    /// One aggregation cycle. Chain fetches and the price batch run concurrently;
    /// any chain fetch failure fails the cycle.
    pub async fn update_volume(&self) -> Result<VolumeSummary> {
        let chain_fetches = try_join_all(self.chains.iter().map(|chain| async move {
            let records = self.subgraph.fetch_volume(*chain).await?;
            Ok::<_, crate::error::VolumeError>((*chain, records))
        }));

        let (volumes, prices) = tokio::join!(chain_fetches, self.fetch_prices());

        let per_chain: BTreeMap<_, _> = volumes?.into_iter().collect();

        let summary = self.aggregator.aggregate(&per_chain, &prices)?;

        tracing::info!(
            chains = summary.chains.len(),
            total = summary.total.amount,
            "Volume updated: {}",
            summary.total.formatted_amount
        );

        Ok(summary)
    }
}
