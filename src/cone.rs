//! Cone-query parameter extraction from an observation label.
//!
//! The catalog query for an observation is keyed by the telescope pointing
//! recorded in the label (`RIGHT_ASCENSION`, `DECLINATION`) and a fixed
//! search radius sized to the instrument's field of view. Label values may
//! carry a trailing unit annotation (`123.45 <deg>`), which is stripped
//! before parsing.

use thiserror::Error;

use crate::label::LabelMap;

/// Conservative cone-search radius (degrees) covering the NEAT tricam field
/// of view. Passed explicitly to [`cone_params`] so tests and callers can
/// override it.
pub const DEFAULT_CONE_RADIUS_DEG: f64 = 0.18;

/// Failure to extract numeric pointing from a label.
///
/// Both variants are non-recoverable for the affected observation; whether
/// the surrounding batch continues is the caller's decision.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LabelError {
    /// A required keyword is absent from the label.
    #[error("label is missing required field {0}")]
    MissingField(String),
    /// A keyword is present but its value does not parse as a number after
    /// the unit annotation is stripped.
    #[error("label field {field} has malformed value {value:?}")]
    MalformedValue { field: String, value: String },
}

/// Sky-search parameters for a catalog cone query, all in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConeParams {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub radius_deg: f64,
}

/// Extract cone-search parameters from a parsed observation label.
///
/// Reads `RIGHT_ASCENSION` and `DECLINATION`, strips any `<...>` unit
/// annotation, and pairs them with the given search radius. No side effects.
pub fn cone_params(label: &LabelMap, radius_deg: f64) -> Result<ConeParams, LabelError> {
    let ra_deg = numeric_field(label, "RIGHT_ASCENSION")?;
    let dec_deg = numeric_field(label, "DECLINATION")?;
    Ok(ConeParams {
        ra_deg,
        dec_deg,
        radius_deg,
    })
}

/// Look up a label field and parse it as f64, unit annotation stripped.
fn numeric_field(label: &LabelMap, field: &str) -> Result<f64, LabelError> {
    let raw = label
        .get(field)
        .ok_or_else(|| LabelError::MissingField(field.to_string()))?;
    let stripped = raw.split('<').next().unwrap_or("").trim();
    stripped.parse().map_err(|_| LabelError::MalformedValue {
        field: field.to_string(),
        value: raw.clone(),
    })
}
