//! Nearest-neighbor cross-matching between a detection catalog and a
//! reference catalog.
//!
//! Distances are **planar** Euclidean norms on (ra, dec) degree pairs, with
//! no cos(dec) longitude compression and no spherical correction. This is a
//! small-angle approximation: for the sub-degree cone radii this pipeline
//! uses it is adequate away from the poles, and it matches the behavior the
//! reduction was validated against. Switching to a proper angular metric
//! would change match results and must be made as an explicit, tested
//! design change, not a drive-by fix.
//!
//! The search is a full scan of the reference list per detection, O(n·m).
//! Catalog sizes here are hundreds to low thousands of rows, so the naive
//! scan is the chosen trade-off; a spatial index (k-d tree) is an optional
//! optimization and must not silently change match results if introduced.

use nalgebra::Vector2;

use crate::source::{Detection, Match, RefStar};

/// Pair every detection with its nearest reference star, keeping pairs
/// closer than `position_tolerance_deg`.
///
/// - A detection whose nearest reference lies at exactly the tolerance is
///   NOT matched (strict inequality).
/// - Equidistant references tie-break to the first in catalog iteration
///   order, which keeps the output deterministic.
/// - Detections with no reference inside the tolerance are dropped, not an
///   error; either catalog being empty yields an empty match list.
///
/// Pure function of its inputs. Per-match logging belongs to the caller.
pub fn match_catalogs(
    references: &[RefStar],
    detections: &[Detection],
    position_tolerance_deg: f64,
) -> Vec<Match> {
    let mut matches = Vec::new();
    if references.is_empty() {
        return matches;
    }

    for (detection_index, detection) in detections.iter().enumerate() {
        let det_pos = Vector2::new(detection.ra_deg, detection.dec_deg);

        let mut best_index = 0usize;
        let mut best_dist = f64::INFINITY;
        for (reference_index, star) in references.iter().enumerate() {
            let ref_pos = Vector2::new(star.ra_deg, star.dec_deg);
            let dist = (ref_pos - det_pos).norm();
            // Strictly-less keeps the first of any equidistant references
            if dist < best_dist {
                best_dist = dist;
                best_index = reference_index;
            }
        }

        if best_dist < position_tolerance_deg {
            matches.push(Match {
                detection_index,
                reference_index: best_index,
                separation_deg: best_dist,
                detection_mag: detection.mag,
                reference_mag: references[best_index].mag,
            });
        }
    }
    matches
}
