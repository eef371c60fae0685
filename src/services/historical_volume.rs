//! Trailing 1/7/30-day volume rollups per chain and token.
//!
//! Each daily bucket is priced at the historical price nearest to its date,
//! taken from a 30-day CoinGecko market chart fetched once per token.

use chrono::{DateTime, Utc};

use crate::error::{Result, VolumeError};
use crate::models::{DailyVolumeRecord, HistoricalVolume, TokenInfo};
use crate::services::fixed_point::decode_amount;
use crate::services::formatter::format_currency;
use crate::services::price_utils::{day_window, price_at};
use crate::services::volume_service::VolumeService;

pub const ROLLUP_WINDOWS_DAYS: [i64; 3] = [1, 7, 30];

/// Days of price history requested per token; covers the widest window
const PRICE_HISTORY_DAYS: u32 = 30;

/// Token-unit and USD sums of daily records, priced by nearest timestamp
pub fn sum_daily_volumes(
    token: &TokenInfo,
    records: &[DailyVolumeRecord],
    price_series: &[(i64, f64)],
) -> Result<(f64, f64)> {
    let mut amount = 0.0;
    let mut amount_usd = 0.0;

    for record in records {
        let decoded = decode_amount(&record.amount, token.decimals)?;
        let date_ms = record.date.checked_mul(1000).ok_or_else(|| {
            VolumeError::MalformedResponse(format!("daily volume {} has out-of-range date {}", record.id, record.date))
        })?;
        let price = price_at(&token.coingecko_id, price_series, date_ms)?;
        amount += decoded;
        amount_usd += decoded * price;
    }

    Ok((amount, amount_usd))
}

/// Compute every window for every configured chain and enabled token, logging
/// each result. The first failure aborts the rollup.
pub async fn run_historical_rollup(
    service: &VolumeService,
    now: DateTime<Utc>,
) -> Result<Vec<HistoricalVolume>> {
    let tokens: Vec<TokenInfo> = service.aggregator().catalog().enabled_tokens().cloned().collect();
    let mut results = Vec::new();

    for token in &tokens {
        let price_series = service
            .coingecko()
            .get_token_market_chart(&token.coingecko_id, "usd", PRICE_HISTORY_DAYS)
            .await?;

        for chain in service.chains() {
            for days in ROLLUP_WINDOWS_DAYS {
                let (start_date, end_date) = day_window(now, days);
                let records = service
                    .subgraph()
                    .fetch_daily_volume(*chain, &token.symbol, start_date, end_date)
                    .await?;

                let (amount, amount_usd) = sum_daily_volumes(token, &records, &price_series)?;

                tracing::info!(
                    chain = %chain,
                    token = %token.symbol,
                    days = days,
                    records = records.len(),
                    "{}d volume: {} ({})",
                    days,
                    format_currency(amount, Some(&token.symbol)),
                    format_currency(amount_usd, None)
                );

                results.push(HistoricalVolume {
                    chain: *chain,
                    token: token.symbol.clone(),
                    days,
                    amount,
                    amount_usd,
                    record_count: records.len(),
                });
            }
        }
    }

    Ok(results)
}
