//! SExtractor `ASCII_HEAD` catalog parsing.
//!
//! SExtractor writes one commented header line per output column,
//!
//! ```text
//! #   1 ALPHAWIN_J2000   Windowed right ascension (J2000)   [deg]
//! #   2 DELTAWIN_J2000   Windowed declination (J2000)       [deg]
//! #   3 MAG_AUTO         Kron-like elliptical aperture mag  [mag]
//! ```
//!
//! followed by whitespace-separated data rows. Column positions come from
//! the header, so the catalog may carry extra columns in any order.

use std::path::Path;

use super::CatalogError;

/// One row of a SExtractor output catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SextractorRow {
    /// `ALPHAWIN_J2000`, degrees.
    pub ra_deg: f64,
    /// `DELTAWIN_J2000`, degrees.
    pub dec_deg: f64,
    /// `MAG_AUTO`, instrumental magnitude.
    pub mag_auto: f64,
}

/// Parse SExtractor catalog text into rows.
///
/// Requires the `ALPHAWIN_J2000`, `DELTAWIN_J2000`, and `MAG_AUTO` columns
/// to be declared in the header. A catalog with a valid header and no data
/// rows parses to an empty vector.
pub fn parse_catalog(text: &str) -> Result<Vec<SextractorRow>, CatalogError> {
    let mut ra_col = None;
    let mut dec_col = None;
    let mut mag_col = None;

    for line in text.lines().filter(|l| l.trim_start().starts_with('#')) {
        let mut tokens = line.trim_start_matches('#').split_whitespace();
        let (Some(index), Some(name)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        // Header indices are 1-based
        let Ok(index) = index.parse::<usize>() else {
            continue;
        };
        if index == 0 {
            continue;
        }
        match name {
            "ALPHAWIN_J2000" => ra_col = Some(index - 1),
            "DELTAWIN_J2000" => dec_col = Some(index - 1),
            "MAG_AUTO" => mag_col = Some(index - 1),
            _ => {}
        }
    }

    let ra_col = ra_col.ok_or_else(|| CatalogError::MissingColumn("ALPHAWIN_J2000".into()))?;
    let dec_col = dec_col.ok_or_else(|| CatalogError::MissingColumn("DELTAWIN_J2000".into()))?;
    let mag_col = mag_col.ok_or_else(|| CatalogError::MissingColumn("MAG_AUTO".into()))?;

    let mut rows = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        let line_no = idx + 1;
        rows.push(SextractorRow {
            ra_deg: parse_field(&fields, ra_col, line_no, "ALPHAWIN_J2000")?,
            dec_deg: parse_field(&fields, dec_col, line_no, "DELTAWIN_J2000")?,
            mag_auto: parse_field(&fields, mag_col, line_no, "MAG_AUTO")?,
        });
    }
    Ok(rows)
}

/// Load and parse a SExtractor catalog file.
pub fn load_catalog_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<SextractorRow>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_catalog(&text)?)
}

fn parse_field(
    fields: &[&str],
    col: usize,
    line: usize,
    name: &str,
) -> Result<f64, CatalogError> {
    fields
        .get(col)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CatalogError::MalformedRow {
            line,
            msg: format!("unparseable {name}"),
        })
}
