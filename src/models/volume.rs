use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

use super::chain::Chain;

/// Raw cumulative volume entry as returned by the subgraph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRecord {
    pub id: String,
    /// Smallest-unit amount as a decimal big-integer string
    pub amount: String,
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyVolumeRecord {
    pub id: String,
    pub amount: String,
    pub token: String,
    /// Day bucket, epoch seconds
    #[serde(deserialize_with = "de_i64_from_str_or_num")]
    pub date: i64,
}

// The Graph serialises Int as a number and BigInt as a string
fn de_i64_from_str_or_num<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StrOrNum {
        Num(i64),
        Str(String),
    }

    match StrOrNum::deserialize(deserializer)? {
        StrOrNum::Num(n) => Ok(n),
        StrOrNum::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainVolume {
    pub amount: f64,
    pub formatted_amount: String,
}

/// One aggregation cycle's output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSummary {
    pub chains: BTreeMap<Chain, ChainVolume>,
    pub total: ChainVolume,
}

/// Trailing-window rollup for one chain/token pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalVolume {
    pub chain: Chain,
    pub token: String,
    pub days: i64,
    /// Token units
    pub amount: f64,
    pub amount_usd: f64,
    pub record_count: usize,
}
