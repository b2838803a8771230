//! Per-observation orchestration: from raw catalog text to a zero-point
//! report.
//!
//! Two entry points mirror the pipeline's data flow:
//!
//! 1. [`cone_request_for_label`] — label text in, PS1 cone request out. An
//!    external HTTP client submits the request and saves the CSV response.
//! 2. [`run_observation`] — PS1 CSV and SExtractor catalog text in,
//!    [`ZeroPointReport`] out.
//!
//! Errors propagate to the caller unchanged: a malformed label or catalog
//! aborts this observation, and whether the surrounding batch continues is
//! the caller's call. Nothing is swallowed or retried here.

use tracing::{debug, info};

use crate::catalogs::ps1::{parse_cone_csv, Ps1ConeRequest};
use crate::catalogs::sextractor::parse_catalog;
use crate::cone::cone_params;
use crate::label::parse_label;
use crate::matcher::match_catalogs;
use crate::offset::{estimate_offset, filtered_residuals};
use crate::source::{detection_from_sextractor, refstar_from_ps1, Detection, Match, RefStar};

/// Tunable parameters for zero-point estimation.
///
/// These were module-level constants in the original reduction scripts;
/// they are explicit here so the core stays testable in isolation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroPointConfig {
    /// Cone-search radius around the label pointing, degrees. Default: 0.18.
    pub cone_radius_deg: f64,
    /// Maximum planar separation for a valid match, degrees. Default: 0.003.
    pub position_tolerance_deg: f64,
    /// Reference stars at or below this magnitude are excluded from the
    /// mean (saturation guard). Default: 16.0.
    pub reference_mag_floor: f64,
    /// Residuals at or above this absolute value are excluded from the
    /// mean (mismatch guard). Default: 40.0.
    pub max_abs_residual: f64,
}

impl Default for ZeroPointConfig {
    fn default() -> Self {
        Self {
            cone_radius_deg: crate::cone::DEFAULT_CONE_RADIUS_DEG,
            position_tolerance_deg: 0.003,
            reference_mag_floor: 16.0,
            max_abs_residual: 40.0,
        }
    }
}

/// Outcome of zero-point estimation for one observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroPointReport {
    /// Advised magnitude shift, or `None` when no match survived the
    /// filters. Never coerced to a number.
    pub magshift: Option<f64>,
    /// Reference stars that carried usable photometry.
    pub num_references: usize,
    /// Detections in the extracted catalog.
    pub num_detections: usize,
    /// All positional matches, before magnitude filtering.
    pub matches: Vec<Match>,
    /// Residuals that survived the magnitude filters.
    pub num_used: usize,
}

/// Build the PS1 cone request for an observation label.
///
/// Fails with [`crate::cone::LabelError`] when the label lacks usable
/// pointing fields.
pub fn cone_request_for_label(
    label_text: &str,
    config: &ZeroPointConfig,
) -> Result<Ps1ConeRequest, crate::cone::LabelError> {
    let label = parse_label(label_text);
    let cone = cone_params(&label, config.cone_radius_deg)?;
    info!(
        "Cone query at RA {:.4}, Dec {:.4}, radius {:.2} deg",
        cone.ra_deg, cone.dec_deg, cone.radius_deg
    );
    Ok(Ps1ConeRequest::for_zero_point(&cone))
}

/// Cross-match parsed catalogs and estimate the zero-point shift.
pub fn estimate_zero_point(
    references: &[RefStar],
    detections: &[Detection],
    config: &ZeroPointConfig,
) -> ZeroPointReport {
    let matches = match_catalogs(references, detections, config.position_tolerance_deg);
    for m in &matches {
        debug!(
            "match: detection {} <-> reference {} at {:.5} deg, residual {:+.3}",
            m.detection_index,
            m.reference_index,
            m.separation_deg,
            m.residual()
        );
    }

    let num_used =
        filtered_residuals(&matches, config.reference_mag_floor, config.max_abs_residual).len();
    let magshift = estimate_offset(&matches, config.reference_mag_floor, config.max_abs_residual);

    match magshift {
        Some(shift) => info!(
            "Advised magshift {:+.4} from {} of {} matches ({} references, {} detections)",
            shift,
            num_used,
            matches.len(),
            references.len(),
            detections.len()
        ),
        None => info!(
            "No valid matches for zero-point ({} references, {} detections)",
            references.len(),
            detections.len()
        ),
    }

    ZeroPointReport {
        magshift,
        num_references: references.len(),
        num_detections: detections.len(),
        matches,
        num_used,
    }
}

/// Run the full per-observation estimation from raw catalog text.
///
/// `ps1_csv` is the saved cone-search response; `sextractor_text` is the
/// SExtractor output catalog for the same image.
pub fn run_observation(
    ps1_csv: &str,
    sextractor_text: &str,
    config: &ZeroPointConfig,
) -> anyhow::Result<ZeroPointReport> {
    let references: Vec<RefStar> = parse_cone_csv(ps1_csv)?
        .iter()
        .filter_map(refstar_from_ps1)
        .collect();
    let detections: Vec<Detection> = parse_catalog(sextractor_text)?
        .iter()
        .map(detection_from_sextractor)
        .collect();

    Ok(estimate_zero_point(&references, &detections, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_reduction_constants() {
        let config = ZeroPointConfig::default();
        assert!((config.cone_radius_deg - 0.18).abs() < 1e-12);
        assert!((config.position_tolerance_deg - 0.003).abs() < 1e-12);
        assert!((config.reference_mag_floor - 16.0).abs() < 1e-12);
        assert!((config.max_abs_residual - 40.0).abs() < 1e-12);
    }

    #[test]
    fn empty_catalogs_report_no_result() {
        let report = estimate_zero_point(&[], &[], &ZeroPointConfig::default());
        assert_eq!(report.magshift, None);
        assert!(report.matches.is_empty());
        assert_eq!(report.num_used, 0);
    }

    #[test]
    fn label_errors_propagate_from_request_builder() {
        let err = cone_request_for_label(
            "RIGHT_ASCENSION = 150.0 <deg>\nEND\n",
            &ZeroPointConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            crate::cone::LabelError::MissingField("DECLINATION".to_string())
        );
    }
}
