use chrono::{DateTime, Utc};

use crate::error::{Result, VolumeError};

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Index of the series entry whose timestamp is closest to `target_ms`.
///
/// On equal distance the earlier index wins. Returns `None` for an empty series.
pub fn nearest_price_index(series: &[(i64, f64)], target_ms: i64) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;

    for (i, (timestamp, _)) in series.iter().enumerate() {
        let distance = timestamp.abs_diff(target_ms);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((i, distance)),
        }
    }

    best.map(|(i, _)| i)
}

/// Price at the nearest timestamp, failing when the series is empty
pub fn price_at(coin_id: &str, series: &[(i64, f64)], target_ms: i64) -> Result<f64> {
    nearest_price_index(series, target_ms)
        .map(|i| series[i].1)
        .ok_or_else(|| VolumeError::PriceHistoryUnavailable(coin_id.to_string()))
}

/// Floor a timestamp (epoch seconds) to its UTC day boundary
pub fn day_bucket(timestamp_secs: i64) -> i64 {
    timestamp_secs - timestamp_secs.rem_euclid(SECONDS_PER_DAY)
}

/// Inclusive `(start, end)` day buckets covering the trailing `days` window
pub fn day_window(now: DateTime<Utc>, days: i64) -> (i64, i64) {
    let end = day_bucket(now.timestamp());
    (end - days * SECONDS_PER_DAY, end)
}
