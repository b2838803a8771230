//! Core record types shared by the matcher and the offset estimator.
//!
//! `Detection` and `RefStar` are the "generic" forms the matcher operates on;
//! the raw catalog row types in [`crate::catalogs`] convert into them. All
//! records are immutable inputs materialized once per pipeline run.

use crate::catalogs::ps1::Ps1Source;
use crate::catalogs::sextractor::SextractorRow;

/// A source detected in a calibrated image, with instrumental photometry.
///
/// Positions are J2000 degrees; the magnitude is in the detector's raw scale
/// (SExtractor `MAG_AUTO`), not yet tied to a standard photometric system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub mag: f64,
}

/// A reference star from an external catalog, with calibrated photometry.
///
/// Positions are J2000 degrees; the magnitude is in a standard band
/// (r-band PSF magnitude for PS1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefStar {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub mag: f64,
}

/// A pairing of one detection with its single nearest reference star.
///
/// Valid only when the angular separation is below the configured tolerance.
/// A detection matches at most one reference; a reference may be claimed by
/// any number of detections (no uniqueness on the reference side).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    /// Index into the detection catalog this match came from.
    pub detection_index: usize,
    /// Index into the reference catalog this match came from.
    pub reference_index: usize,
    /// Planar separation between the pair, in degrees.
    pub separation_deg: f64,
    /// Instrumental magnitude of the detection.
    pub detection_mag: f64,
    /// Calibrated magnitude of the reference star.
    pub reference_mag: f64,
}

impl Match {
    /// Magnitude residual: calibrated minus instrumental.
    ///
    /// The mean of these residuals over a filtered match set is the advised
    /// zero-point shift.
    pub fn residual(&self) -> f64 {
        self.reference_mag - self.detection_mag
    }
}

/// Convert a PS1 row to a generic reference star.
///
/// Returns `None` when the row carries no r-band PSF magnitude (the PS1
/// missing-value sentinel was present); such rows cannot contribute to the
/// zero-point estimate and are dropped before matching.
pub fn refstar_from_ps1(row: &Ps1Source) -> Option<RefStar> {
    Some(RefStar {
        ra_deg: row.ra_deg,
        dec_deg: row.dec_deg,
        mag: row.r_psf_mag?,
    })
}

/// Convert a SExtractor catalog row to a generic detection.
pub fn detection_from_sextractor(row: &SextractorRow) -> Detection {
    Detection {
        ra_deg: row.ra_deg,
        dec_deg: row.dec_deg,
        mag: row.mag_auto,
    }
}
