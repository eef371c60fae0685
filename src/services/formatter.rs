use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Tokens whose amounts render as bare numbers rather than dollars
pub const BARE_AMOUNT_TOKENS: [&str; 2] = ["ETH", "MATIC"];

const MAX_FRACTION_DIGITS: u32 = 3;

/// Display string for a volume: en-US grouping, `$` prefix unless the token is
/// one of [`BARE_AMOUNT_TOKENS`].
pub fn format_currency(value: f64, token: Option<&str>) -> String {
    let number = format_number(value);

    match token {
        Some(t) if BARE_AMOUNT_TOKENS.contains(&t) => number,
        _ => format!("${}", number),
    }
}

/// en-US number formatting: thousands separators, at most three fraction
/// digits rounded half away from zero, no trailing zeros.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }

    let plain = match Decimal::from_f64(value) {
        Some(d) => d
            .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        // Beyond Decimal's range there is no fractional part worth keeping
        None => format!("{}", value.trunc()),
    };

    group_thousands(&plain)
}

fn group_thousands(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // -0 after rounding prints as 0
    let sign = if grouped.chars().all(|c| c == '0' || c == ',') && frac_part.is_none() {
        ""
    } else {
        sign
    };

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
