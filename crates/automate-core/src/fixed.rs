use fixed::types::{I32F32, I64F64};

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Used for probabilities and price multipliers so that randomized and
/// derived outputs are identical on every peer.
pub type Fixed64 = I32F32;

/// Ticks are the host simulation's atomic unit of time.
pub type Ticks = u64;

/// Convert an f64 to Fixed64. Use only for initialization, never in the cycle loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Multiply a whole price by a fixed-point factor, rounding down and
/// saturating at `u32::MAX`.
#[inline]
pub fn scale_price(price: u32, factor: Fixed64) -> u32 {
    let scaled = I64F64::from_num(price) * I64F64::from_num(factor);
    u32::try_from(scaled.to_num::<i64>().max(0)).unwrap_or(u32::MAX)
}
