use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Chain, ChainVolume, PriceMap, TokenCatalog, VolumeRecord, VolumeSummary};
use crate::services::fixed_point::decode_token_amount;
use crate::services::formatter::format_currency;

/// Converts raw per-chain volume records into USD totals.
///
/// Sums are plain `f64` additions of per-record values, so totals carry the
/// usual floating-point rounding error.
#[derive(Clone)]
pub struct VolumeAggregator {
    catalog: Arc<TokenCatalog>,
}

impl VolumeAggregator {
    pub fn new(catalog: Arc<TokenCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    /// USD total of one chain's records. Records for disabled tokens are skipped.
    pub fn chain_volume(&self, records: &[VolumeRecord], prices: &PriceMap) -> Result<ChainVolume> {
        let mut amount = 0.0;
        let mut tokens_seen: Option<&str> = None;
        let mut mixed = false;

        for record in records {
            if !self.catalog.is_enabled(&record.token) {
                continue;
            }

            let decoded = decode_token_amount(&self.catalog, &record.token, &record.amount)?;
            amount += decoded * prices.price(&record.token);

            match tokens_seen {
                None => tokens_seen = Some(record.token.as_str()),
                Some(t) if t != record.token => mixed = true,
                _ => {}
            }
        }

        // A single-token chain is labelled with that token
        let label = if mixed { None } else { tokens_seen };

        Ok(ChainVolume {
            amount,
            formatted_amount: format_currency(amount, label),
        })
    }

    pub fn aggregate(
        &self,
        per_chain: &BTreeMap<Chain, Vec<VolumeRecord>>,
        prices: &PriceMap,
    ) -> Result<VolumeSummary> {
        let mut chains = BTreeMap::new();
        let mut total_amount = 0.0;

        for (chain, records) in per_chain {
            let volume = self.chain_volume(records, prices)?;
            tracing::debug!(
                chain = %chain,
                records = records.len(),
                amount = volume.amount,
                "Chain volume"
            );
            total_amount += volume.amount;
            chains.insert(*chain, volume);
        }

        let total = ChainVolume {
            amount: total_amount,
            formatted_amount: format_currency(total_amount, None),
        };

        Ok(VolumeSummary { chains, total })
    }
}
