use num_bigint::BigInt;
use num_traits::Signed;

/// The number of decimal places kept by [`scale_value`]
pub const PRECISION: u32 = 6;

/// `10^PRECISION`, the factor applied to every m/z and intensity value
pub const PRECISION_FACTOR: f64 = 1_000_000.0;

/// The minimum number of digits the weighted sum is written with
pub const SUM_BLOCK_WIDTH: usize = 10;

/// Scale a value by `10^6` and truncate it toward zero.
///
/// The product is an IEEE-754 double multiplication, and the conversion
/// saturates at the bounds of `i64`, with `NaN` mapping to `0`.
#[inline]
pub fn scale_value(value: f64) -> i64 {
    (value * PRECISION_FACTOR) as i64
}

/// Write `value` in decimal, left-padding the magnitude with zeros to at
/// least `width` digits. A negative sign, if any, precedes the padding.
pub fn zero_pad(value: &BigInt, width: usize) -> String {
    let digits = value.abs().to_string();
    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}{digits:0>width$}")
}
