//! Raw catalog formats: PS1 cone-search CSV and SExtractor ASCII catalogs.

use thiserror::Error;

pub mod ps1;
pub mod sextractor;

/// Structural failure while reading a tabular catalog.
///
/// Missing columns and unparseable rows fail loudly; a catalog with zero
/// data rows is not an error (empty in, empty out).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is missing required column {0}")]
    MissingColumn(String),
    #[error("catalog row {line}: {msg}")]
    MalformedRow { line: usize, msg: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
