//! Fixed-point token amount decoding
//!
//! Subgraph amounts are smallest-unit integers encoded as decimal strings and
//! routinely exceed `u64` (18-decimal tokens). They are parsed into `U256` and
//! scaled with `format_units` before the final `f64` conversion.

use alloy::primitives::{utils::format_units, U256};
use std::str::FromStr;

use crate::error::{Result, VolumeError};
use crate::models::TokenCatalog;

/// `raw / 10^decimals` as a float
pub fn decode_amount(raw: &str, decimals: u8) -> Result<f64> {
    let value = U256::from_str(raw.trim()).map_err(|e| {
        VolumeError::MalformedResponse(format!("Invalid raw amount '{}': {}", raw, e))
    })?;

    let formatted = format_units(value, decimals).map_err(|e| {
        VolumeError::MalformedResponse(format!("Cannot scale by {} decimals: {}", decimals, e))
    })?;

    formatted.parse::<f64>().map_err(|e| {
        VolumeError::MalformedResponse(format!("Invalid decimal '{}': {}", formatted, e))
    })
}

/// Decode using the token's decimals from the catalog
pub fn decode_token_amount(catalog: &TokenCatalog, token: &str, raw: &str) -> Result<f64> {
    let decimals = catalog.decimals(token)?;
    decode_amount(raw, decimals)
}
