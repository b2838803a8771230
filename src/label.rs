//! Observation label (`.lbl`) parsing.
//!
//! NEAT observations ship a PDS-style label file next to each FITS frame:
//! one `KEYWORD = value` assignment per line, terminated by a bare `END`.
//! Values are kept as raw strings, unit annotations included (for example
//! `RIGHT_ASCENSION = 123.45 <deg>`); numeric interpretation happens in
//! [`crate::cone`].

use std::collections::HashMap;
use std::path::Path;

/// Parsed label: a flat mapping from keyword to raw string value.
pub type LabelMap = HashMap<String, String>;

/// Parse label text into a keyword map.
///
/// Lines without an `=` are ignored, as is everything after a bare `END`
/// line. Repeated keywords keep the last assignment.
pub fn parse_label(text: &str) -> LabelMap {
    let mut map = LabelMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line == "END" {
            break;
        }
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            map.insert(key.to_string(), value.trim().to_string());
        }
    }
    map
}

/// Load and parse a label file.
pub fn load_label_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<LabelMap> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_label(&text))
}
