//! Exact decimal capability.
//!
//! All ledger arithmetic is exact: no rounding, no tolerance. Amounts are
//! `rust_decimal::Decimal`; this module holds the string conversions the
//! ledger relies on (snapshot round trip, fixed-point rendering).

pub use rust_decimal::Decimal;

use crate::error::{DomainError, DomainResult};

/// Parse text as an exact decimal.
///
/// Accepts `[+-]digits[.digits][(e|E)[+-]digits]` and nothing else: no
/// surrounding whitespace, no `_` separators. Scientific input is shifted to
/// plain notation before parsing, so in both notations text that cannot be
/// represented without losing digits is rejected rather than rounded.
pub fn parse_exact(text: &str) -> DomainResult<Decimal> {
    let invalid = || DomainError::invalid_decimal(text);

    let (mantissa, exponent) = match text.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (text, None),
    };
    let (negative, unsigned) = match mantissa.as_bytes().first() {
        Some(b'-') => (true, &mantissa[1..]),
        Some(b'+') => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    if int_part.is_empty() || !all_digits(int_part) || !all_digits(frac_part) {
        return Err(invalid());
    }
    if unsigned.ends_with('.') {
        return Err(invalid());
    }

    let plain = match exponent {
        None => unsigned.to_string(),
        Some(exponent) => {
            let exponent = parse_exponent(exponent).ok_or_else(invalid)?;
            shift_point(int_part, frac_part, exponent)
        }
    };
    let mut value = Decimal::from_str_exact(&plain).map_err(|_| invalid())?;
    if negative {
        value.set_sign_negative(true);
    }
    Ok(value)
}

fn all_digits(part: &str) -> bool {
    part.bytes().all(|b| b.is_ascii_digit())
}

// Beyond this no value fits in a 28-digit scale anyway.
const MAX_EXPONENT: i64 = 64;

fn parse_exponent(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    if digits.is_empty() || !all_digits(digits) || digits.len() > 4 {
        return None;
    }
    let exponent: i64 = text.parse().ok()?;
    (exponent.abs() <= MAX_EXPONENT).then_some(exponent)
}

/// Move the decimal point of `int.frac` by `exponent` places, textually.
fn shift_point(int_part: &str, frac_part: &str, exponent: i64) -> String {
    let digits = format!("{int_part}{frac_part}");
    let point = int_part.len() as i64 + exponent;
    if point <= 0 {
        format!("0.{}{digits}", "0".repeat(point.unsigned_abs() as usize))
    } else if point as usize >= digits.len() {
        format!("{digits}{}", "0".repeat(point as usize - digits.len()))
    } else {
        let (head, tail) = digits.split_at(point as usize);
        format!("{head}.{tail}")
    }
}

/// Exact string form; `parse_exact(&to_exact_string(d)) == d` with the same scale.
pub fn to_exact_string(value: &Decimal) -> String {
    normalize_zero(*value).to_string()
}

/// Fixed-point form with at least `min_scale` fractional digits.
///
/// Digits beyond `min_scale` are kept, never rounded away.
pub fn to_fixed(value: &Decimal, min_scale: u32) -> String {
    let mut out = to_exact_string(value);
    let scale = value.scale();
    if scale >= min_scale {
        return out;
    }
    if scale == 0 && min_scale > 0 {
        out.push('.');
    }
    for _ in scale..min_scale {
        out.push('0');
    }
    out
}

/// Exact addition; overflow is a precondition violation, not a wrap.
pub fn checked_sum(lhs: Decimal, rhs: Decimal) -> DomainResult<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| DomainError::overflow(format!("{lhs} + {rhs}")))
}

/// Exact equality with zero (negative zero included).
pub fn is_exact_zero(value: &Decimal) -> bool {
    value.is_zero()
}

// `-0` would otherwise print with a sign.
fn normalize_zero(value: Decimal) -> Decimal {
    if value.is_zero() && value.is_sign_negative() {
        let mut positive = value;
        positive.set_sign_positive(true);
        positive
    } else {
        value
    }
}
