// src/math.rs
//! Conversions between raw on-chain integer amounts, floats, and the
//! 18-decimal fixed-point strings written to snapshots.

use num_bigint::BigUint;
use num_traits::One;

use crate::shared::errors::PriceError;

/// Precision of the fixed-point representation in the persisted report.
pub const FIXED_POINT_DECIMALS: usize = 18;

/// Convert a raw integer amount with `decimals` places into a float.
///
/// The division happens in decimal text, so the result is the correctly
/// rounded `f64` for the exact quotient even when `raw` is far outside the
/// 53-bit mantissa range.
pub fn scaled_to_float(raw: &BigUint, decimals: u8) -> Result<f64, PriceError> {
    let digits = raw.to_str_radix(10);
    let decimals = decimals as usize;

    let text = if decimals == 0 {
        digits
    } else if digits.len() > decimals {
        let (int_part, frac_part) = digits.split_at(digits.len() - decimals);
        format!("{}.{}", int_part, frac_part)
    } else {
        format!("0.{}{}", "0".repeat(decimals - digits.len()), digits)
    };

    text.parse::<f64>()
        .map_err(|e| PriceError::InvalidAmount(format!("cannot scale {}: {}", raw, e)))
}

/// Convert a USD float into its 18-decimal fixed-point integer string,
/// rounding half up at the 19th fractional digit.
///
/// The float is decomposed into its exact binary mantissa and exponent, so
/// the result is the exact value of `value * 10^18` rounded to an integer.
/// `0.1 + 0.2` therefore yields `300000000000000044`, not `300000000000000000`.
pub fn to_fixed_point(value: f64) -> Result<String, PriceError> {
    if !value.is_finite() {
        return Err(PriceError::InvalidAmount(format!("{} is not finite", value)));
    }
    if value < 0.0 {
        return Err(PriceError::InvalidAmount(format!("{} is negative", value)));
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }

    // value == mantissa * 2^exponent exactly
    let bits = value.to_bits();
    let biased = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    let (mantissa, exponent) = if biased == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), biased - 1075)
    };

    let scaled = BigUint::from(mantissa) * BigUint::from(10u32).pow(FIXED_POINT_DECIMALS as u32);
    let rounded = if exponent >= 0 {
        scaled << exponent as usize
    } else {
        let shift = exponent.unsigned_abs() as usize;
        let quotient = &scaled >> shift;
        let remainder = scaled - (&quotient << shift);
        if remainder >= BigUint::one() << (shift - 1) {
            quotient + BigUint::one()
        } else {
            quotient
        }
    };

    Ok(rounded.to_str_radix(10))
}
