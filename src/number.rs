use super::*;

pub type Floating = f64;

/// Clamp `x` into `[-delta, delta]`, used by the Huber deviation and
/// separation sub-gradients.
#[inline]
pub fn clamp_sym(x: Floating, delta: Floating) -> Floating {
    x.clamp(-delta, delta)
}

/// `base^exponent` with the convention `pow(*, 0) = 1`, matching the
/// `Pow` helper used by the sub-gradient formulas (avoids the `0^0`
/// domain question, keeping the intent explicit at call sites that
/// rely on it for `p == 1`).
#[inline]
pub fn pow_conv(base: Floating, exponent: i32) -> Floating {
    if exponent == 0 {
        1.0
    } else {
        base.powi(exponent)
    }
}
