//! Magnitude zero-point offset estimation from a cross-matched set.
//!
//! The estimate is the arithmetic mean of per-match residuals
//! (`reference − instrumental`) after two filters:
//!
//! - the reference star must be *fainter* than a magnitude floor, excluding
//!   bright/saturated stars whose catalog photometry is unreliable;
//! - the absolute residual must be below a cap, excluding gross mismatches
//!   such as a wrong cross-identification.
//!
//! This is deliberately NOT a robust statistic — no sigma clipping, no
//! median. A single surviving outlier moves the mean. That limitation is
//! accepted for this pipeline's catalog sizes and documented here rather
//! than silently upgraded.

use crate::source::Match;

/// Residuals that survive the filter policy, in match order.
///
/// A residual is kept iff `reference_mag > reference_mag_floor` and
/// `|residual| < max_abs_residual` (both strict).
pub fn filtered_residuals(
    matches: &[Match],
    reference_mag_floor: f64,
    max_abs_residual: f64,
) -> Vec<f64> {
    matches
        .iter()
        .filter(|m| m.reference_mag > reference_mag_floor)
        .map(|m| m.residual())
        .filter(|r| r.abs() < max_abs_residual)
        .collect()
}

/// Mean magnitude offset over the filtered match set.
///
/// Returns `None` when no residual survives the filters — the caller must
/// distinguish this from a genuine zero-offset result, so it is never
/// coerced to `0.0` or NaN.
pub fn estimate_offset(
    matches: &[Match],
    reference_mag_floor: f64,
    max_abs_residual: f64,
) -> Option<f64> {
    let residuals = filtered_residuals(matches, reference_mag_floor, max_abs_residual);
    if residuals.is_empty() {
        return None;
    }
    Some(residuals.iter().sum::<f64>() / residuals.len() as f64)
}
