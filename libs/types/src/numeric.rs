//! Decimal helpers for prices and quantities
//!
//! Uses rust_decimal for deterministic arithmetic (no floating-point errors).
//! Display values are rounded to cents with midpoint-away-from-zero.
//!
//! The data source is loosely typed: numeric fields may arrive as JSON
//! numbers or as strings. [`lenient_decimal`] accepts both and decodes
//! anything unusable to zero instead of rejecting the whole payload.
//! [`lenient_u64`] does the same for integer fields such as ids and flags.
//!
//! Derived values never panic: arithmetic that leaves the `Decimal` range
//! resolves to zero and logs a warning.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::warn;

/// Number of decimal places used for derived display values.
pub const DISPLAY_DP: u32 = 2;

/// Divisor applied to `price × quantity`: prices are quoted in percent.
pub const PERCENT_PRICE_DIVISOR: Decimal = Decimal::ONE_HUNDRED;

/// Round to two decimal places, midpoint away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Notional of a percent-quoted price: `round(price × quantity / 100, 2)`.
///
/// Zero when the product overflows.
pub fn percent_notional(price: Decimal, quantity: Decimal) -> Decimal {
    match price
        .checked_mul(quantity)
        .and_then(|product| product.checked_div(PERCENT_PRICE_DIVISOR))
    {
        Some(notional) => round_cents(notional),
        None => {
            warn!(%price, %quantity, "Notional overflowed, using zero");
            Decimal::ZERO
        }
    }
}

/// `minuend - subtrahend`, zero when the result overflows.
pub fn difference(minuend: Decimal, subtrahend: Decimal) -> Decimal {
    minuend.checked_sub(subtrahend).unwrap_or_else(|| {
        warn!(%minuend, %subtrahend, "Difference overflowed, using zero");
        Decimal::ZERO
    })
}

/// Parse a decimal from text, falling back to zero.
///
/// Surrounding whitespace is ignored; scientific notation is accepted.
pub fn parse_or_zero(text: &str) -> Decimal {
    let trimmed = text.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .unwrap_or(Decimal::ZERO)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumeric {
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumeric {
    fn into_decimal(self) -> Decimal {
        match self {
            RawNumeric::Unsigned(v) => Decimal::from(v),
            RawNumeric::Signed(v) => Decimal::from(v),
            RawNumeric::Float(v) => Decimal::try_from(v).unwrap_or(Decimal::ZERO),
            RawNumeric::Text(s) => parse_or_zero(&s),
            RawNumeric::Other(_) => Decimal::ZERO,
        }
    }

    /// Whole non-negative values only; everything else is zero.
    fn into_u64(self) -> u64 {
        match self {
            RawNumeric::Unsigned(v) => v,
            RawNumeric::Text(s) => match s.trim().parse::<u64>() {
                Ok(v) => v,
                Err(_) => whole_u64(parse_or_zero(&s)),
            },
            other => whole_u64(other.into_decimal()),
        }
    }
}

fn whole_u64(value: Decimal) -> u64 {
    if value.fract().is_zero() {
        value.to_u64().unwrap_or(0)
    } else {
        0
    }
}

/// Serde `deserialize_with` adapter for loosely typed numeric fields.
///
/// Numbers and numeric strings decode to their value; `null`, booleans,
/// unparseable strings and nested structures decode to zero.
pub fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumeric::deserialize(deserializer)?.into_decimal())
}

/// Serde `deserialize_with` adapter for loosely typed integer fields.
///
/// Accepts numbers and numeric strings. Negative, fractional, out of range
/// and non-numeric values decode to zero.
pub fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(RawNumeric::deserialize(deserializer)?.into_u64())
}
