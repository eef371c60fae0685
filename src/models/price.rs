use std::collections::HashMap;
use tracing::warn;

use crate::error::VolumeError;

/// Price substituted when a token's spot price cannot be resolved
pub const FALLBACK_PRICE: f64 = 1.0;

/// Per-token outcome of a spot price batch
pub type PriceQuotes = HashMap<String, Result<f64, VolumeError>>;

/// Symbol -> USD price for one aggregation cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceMap {
    prices: HashMap<String, f64>,
}

impl PriceMap {
    /// Reduce per-token quotes to prices, substituting the fallback for failures
    pub fn from_quotes(quotes: PriceQuotes) -> Self {
        let prices = quotes
            .into_iter()
            .map(|(symbol, quote)| match quote {
                Ok(price) => (symbol, price),
                Err(e) => {
                    warn!(
                        token = %symbol,
                        error = %e,
                        fallback = FALLBACK_PRICE,
                        "Using fallback price"
                    );
                    (symbol, FALLBACK_PRICE)
                }
            })
            .collect();

        Self { prices }
    }

    /// Price for `symbol`, or the fallback if it was never quoted
    pub fn price(&self, symbol: &str) -> f64 {
        self.prices.get(symbol).copied().unwrap_or(FALLBACK_PRICE)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().map(|(s, p)| (s.into(), p)).collect(),
        }
    }
}
