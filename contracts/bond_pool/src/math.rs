//! Fixed-point fee arithmetic.
//!
//! Fee rates are integers on a 1,000,000 = 100% scale. All intermediate
//! multiplications are checked; overflow surfaces as
//! [`BondError::ArithmeticOverflow`] instead of wrapping.

use crate::errors::BondError;

/// Fee-rate scale: 1_000_000 == 100%.
pub const FEE_SCALE: u32 = 1_000_000;

/// Split `amount` into `(fee, net)` at `rate` (on [`FEE_SCALE`]).
///
/// `fee = amount * rate / FEE_SCALE` with floor division; `fee + net`
/// always equals `amount` exactly.
#[inline]
pub fn split(amount: i128, rate: u32) -> Result<(i128, i128), BondError> {
    let fee = amount
        .checked_mul(rate as i128)
        .ok_or(BondError::ArithmeticOverflow)?
        / FEE_SCALE as i128;
    Ok((fee, amount - fee))
}

/// Checked `i128` addition.
#[inline]
pub fn add(a: i128, b: i128) -> Result<i128, BondError> {
    a.checked_add(b).ok_or(BondError::ArithmeticOverflow)
}

/// Checked `a * b / d` with floor division.
#[inline]
pub fn mul_div(a: i128, b: i128, d: i128) -> Result<i128, BondError> {
    a.checked_mul(b)
        .and_then(|v| v.checked_div(d))
        .ok_or(BondError::ArithmeticOverflow)
}
