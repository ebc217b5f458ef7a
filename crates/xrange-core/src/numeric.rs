#![forbid(unsafe_code)]

//! Pure numeric helpers shared by the value model and the controller.
//!
//! All functions follow IEEE-754 comparison semantics: NaN inputs propagate
//! as NaN rather than being coerced into range. Callers that need a
//! guaranteed finite result must reject NaN before calling in.

/// Relative tolerance applied to the quotient in [`quantize`] so that
/// values sitting on a grid line in decimal (`0.3` on a `0.1` grid) are not
/// pushed one step down by binary representation error. A grid point
/// reached through the tolerance is only taken when it does not exceed the
/// input.
pub const QUANTIZE_TOLERANCE: f64 = 1e-9;

/// Upper bound on the decimal places [`quantize`] snaps results to.
pub const MAX_SNAP_DECIMALS: i32 = 12;

/// Relative slack when deciding whether a scaled step is a whole number.
const DECIMAL_TOLERANCE: f64 = 1e-12;

/// Bound `x` to `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics when `lo > hi`; the upper bound
/// wins, matching `min(max(x, lo), hi)`.
#[inline]
#[must_use]
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    if x.is_nan() {
        return x;
    }
    x.max(lo).min(hi)
}

/// Bound `x` to the unit interval `[0, 1]`.
#[inline]
#[must_use]
pub fn clamp_unit(x: f64) -> f64 {
    clamp(x, 0.0, 1.0)
}

/// Affine remap of `x` from `[from_lo, from_hi]` onto `[to_lo, to_hi]`.
///
/// A degenerate source range (`from_hi == from_lo`) yields ±Infinity or NaN.
#[inline]
#[must_use]
pub fn map_range(x: f64, from_lo: f64, from_hi: f64, to_lo: f64, to_hi: f64) -> f64 {
    (x - from_lo) / (from_hi - from_lo) * (to_hi - to_lo) + to_lo
}

/// Floor `x` to the nearest lower multiple of `step` (grid anchored at 0).
///
/// Rounds toward negative infinity, never to nearest: `quantize(1.99, 1.0)`
/// is `1.0` and `quantize(-0.5, 1.0)` is `-1.0`. The result is snapped to
/// the decimal precision of `step` so grid points come back as the literal
/// a caller would write (`quantize(0.3, 0.1) == 0.3`).
///
/// For finite input the result never exceeds `x`: `quantize(2.9999999999,
/// 1.0)` is `2.0`.
///
/// `step` must be positive and finite; other steps yield NaN or Infinity.
#[must_use]
pub fn quantize(x: f64, step: f64) -> f64 {
    let quotient = x / step;
    if !quotient.is_finite() {
        return quotient.floor() * step;
    }
    let places = decimal_places(step);
    let biased = (quotient + quotient.abs().max(1.0) * QUANTIZE_TOLERANCE).floor();
    let floored = quotient.floor();
    [biased, floored, floored - 1.0]
        .into_iter()
        .map(|k| snap_to_decimals(k * step, places))
        .find(|&candidate| candidate <= x)
        .unwrap_or((floored - 1.0) * step)
}

/// Number of decimal places needed to write `step` exactly, capped at
/// [`MAX_SNAP_DECIMALS`].
#[must_use]
pub fn decimal_places(step: f64) -> i32 {
    if !step.is_finite() {
        return 0;
    }
    let mut scaled = step.abs();
    for places in 0..MAX_SNAP_DECIMALS {
        if (scaled - scaled.round()).abs() <= scaled.max(1.0) * DECIMAL_TOLERANCE {
            return places;
        }
        scaled *= 10.0;
    }
    MAX_SNAP_DECIMALS
}

fn snap_to_decimals(x: f64, places: i32) -> f64 {
    if places == 0 {
        return x;
    }
    let factor = 10f64.powi(places);
    let snapped = (x * factor).round() / factor;
    // Magnitudes near f64::MAX overflow the scaled product.
    if snapped.is_finite() { snapped } else { x }
}
