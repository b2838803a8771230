//! # magshift
//!
//! Photometric **zero-point estimation** against the Pan-STARRS1 (PS1) catalog.
//!
//! This crate is the reduction core of a small-telescope image pipeline: after
//! dark/flat calibration and source extraction have run (both external to this
//! crate), it cross-matches the extracted detections against a PS1 cone-search
//! result and derives the systematic shift between instrumental and calibrated
//! magnitudes.
//!
//! ## Pipeline
//!
//! 1. **Cone parameters** — read the observation's `.lbl` metadata and extract
//!    the sky position for the catalog query ([`cone_params`]).
//! 2. **Reference catalog** — an external HTTP client submits the rendered
//!    [`Ps1ConeRequest`](catalogs::ps1::Ps1ConeRequest) and hands back CSV text,
//!    parsed by [`catalogs::ps1::parse_cone_csv`].
//! 3. **Detection catalog** — the SExtractor output catalog is parsed by
//!    [`catalogs::sextractor::parse_catalog`].
//! 4. **Cross-match** — each detection is paired with its nearest reference
//!    star within a positional tolerance ([`match_catalogs`]).
//! 5. **Offset** — the mean of the filtered magnitude residuals is the advised
//!    zero-point shift ([`estimate_offset`]).
//!
//! ## Example
//!
//! ```
//! use magshift::{match_catalogs, estimate_offset, Detection, RefStar};
//!
//! let references = vec![RefStar { ra_deg: 10.000, dec_deg: 20.000, mag: 18.0 }];
//! let detections = vec![Detection { ra_deg: 10.001, dec_deg: 20.001, mag: 17.5 }];
//!
//! let matches = match_catalogs(&references, &detections, 0.003);
//! assert_eq!(matches.len(), 1);
//!
//! let shift = estimate_offset(&matches, 16.0, 40.0);
//! assert!((shift.unwrap() - 0.5).abs() < 1e-9);
//! ```
//!
//! ## Design notes
//!
//! - Matching uses **planar** Euclidean distance on degree coordinates, with
//!   no cos(dec) or spherical correction. This is a deliberate small-field
//!   approximation (cone radii well under a degree); see [`match_catalogs`].
//! - The offset is a plain mean of a filtered set, not a robust statistic.
//!   See [`estimate_offset`] for the filter policy.
//! - The crate performs no network or image I/O. HTTP cone searches, FITS
//!   calibration, and SExtractor invocation are upstream collaborators.

pub mod catalogs;
pub mod cone;
pub mod label;
pub mod matcher;
pub mod offset;
pub mod pipeline;
pub mod source;

pub use cone::{cone_params, ConeParams, LabelError, DEFAULT_CONE_RADIUS_DEG};
pub use label::{parse_label, LabelMap};
pub use matcher::match_catalogs;
pub use offset::{estimate_offset, filtered_residuals};
pub use pipeline::{
    cone_request_for_label, estimate_zero_point, run_observation, ZeroPointConfig,
    ZeroPointReport,
};
pub use source::{Detection, Match, RefStar};
