//! Pan-STARRS1 (PS1) cone-search requests and CSV responses.
//!
//! The MAST catalog API serves PS1 as `{baseurl}/{release}/{table}.csv` with
//! the cone and filter constraints passed as query parameters. This module
//! owns the request *construction* — table/release legality, column list,
//! constraint rendering — and the parsing of the CSV text that comes back.
//! Submitting the HTTP request is an external collaborator's job.
//!
//! The PS1 CSV uses `-999.0` as a missing-magnitude sentinel; parsed rows
//! carry `Option<f64>` magnitudes instead.

use std::path::Path;

use crate::cone::ConeParams;

use super::CatalogError;

/// Default MAST base URL for the PS1 catalog API.
pub const PS1_BASE_URL: &str = "https://catalogs.mast.stsci.edu/api/v0.1/panstarrs";

/// Missing-value sentinel used by PS1 magnitude columns.
pub const PS1_MISSING_MAG: f64 = -999.0;

/// PS1 table to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ps1Table {
    Mean,
    Stack,
    Detection,
}

impl Ps1Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ps1Table::Mean => "mean",
            Ps1Table::Stack => "stack",
            Ps1Table::Detection => "detection",
        }
    }
}

/// PS1 data release to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ps1Release {
    Dr1,
    Dr2,
}

impl Ps1Release {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ps1Release::Dr1 => "dr1",
            Ps1Release::Dr2 => "dr2",
        }
    }

    /// Whether this release serves the given table.
    /// The per-epoch detection table only exists in DR2.
    pub fn supports(&self, table: Ps1Table) -> bool {
        match self {
            Ps1Release::Dr1 => matches!(table, Ps1Table::Mean | Ps1Table::Stack),
            Ps1Release::Dr2 => true,
        }
    }
}

/// A fully specified PS1 cone-search request.
///
/// Renders to a URL plus query parameters for an external HTTP client.
#[derive(Debug, Clone, PartialEq)]
pub struct Ps1ConeRequest {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub radius_deg: f64,
    pub table: Ps1Table,
    pub release: Ps1Release,
    /// Columns to request. Empty means the API default column set.
    pub columns: Vec<String>,
    /// Extra filter constraints, e.g. `("rApMag.min", "15")`.
    pub constraints: Vec<(String, String)>,
}

impl Ps1ConeRequest {
    /// The query used for zero-point estimation: DR2 stack photometry with
    /// position and g/r magnitudes, restricted to primary detections in a
    /// reliable r-band aperture-magnitude range.
    pub fn for_zero_point(cone: &ConeParams) -> Self {
        Self {
            ra_deg: cone.ra_deg,
            dec_deg: cone.dec_deg,
            radius_deg: cone.radius_deg,
            table: Ps1Table::Stack,
            release: Ps1Release::Dr2,
            columns: ["raMean", "decMean", "gApMag", "rApMag", "rPSFMag"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            constraints: vec![
                ("primaryDetection".to_string(), "1".to_string()),
                ("rApMag.min".to_string(), "15".to_string()),
                ("rApMag.max".to_string(), "22".to_string()),
            ],
        }
    }

    /// Check that the table/release combination is one the API serves.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.release.supports(self.table),
            "PS1 release {} does not serve table {}",
            self.release.as_str(),
            self.table.as_str()
        );
        Ok(())
    }

    /// Endpoint URL for this request.
    pub fn url(&self, baseurl: &str) -> String {
        format!(
            "{}/{}/{}.csv",
            baseurl,
            self.release.as_str(),
            self.table.as_str()
        )
    }

    /// Query parameters in the form the MAST API expects.
    ///
    /// Column lists are rendered as a single bracketed parameter,
    /// `columns=[a,b,c]`.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("ra".to_string(), self.ra_deg.to_string()),
            ("dec".to_string(), self.dec_deg.to_string()),
            ("radius".to_string(), self.radius_deg.to_string()),
        ];
        if !self.columns.is_empty() {
            pairs.push(("columns".to_string(), format!("[{}]", self.columns.join(","))));
        }
        pairs.extend(self.constraints.iter().cloned());
        pairs
    }
}

/// One row of a PS1 cone-search result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ps1Source {
    pub ra_deg: f64,
    pub dec_deg: f64,
    pub g_ap_mag: Option<f64>,
    pub r_ap_mag: Option<f64>,
    pub r_psf_mag: Option<f64>,
}

/// Parse PS1 cone-search CSV text into rows sorted by r aperture magnitude
/// (brightest first, rows without one last).
///
/// `raMean` and `decMean` columns are required; magnitude columns are
/// optional and the `-999.0` sentinel maps to `None`. Empty input yields an
/// empty catalog, not an error.
pub fn parse_cone_csv(text: &str) -> Result<Vec<Ps1Source>, CatalogError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = csv::Reader::from_reader(text.as_bytes());
    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.trim() == name);

    let ra_col = col("raMean").ok_or_else(|| CatalogError::MissingColumn("raMean".into()))?;
    let dec_col = col("decMean").ok_or_else(|| CatalogError::MissingColumn("decMean".into()))?;
    let g_ap_col = col("gApMag");
    let r_ap_col = col("rApMag");
    let r_psf_col = col("rPSFMag");

    let mut sources = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result?;
        let line = idx + 2; // header occupies line 1
        let ra_deg = parse_coord(&record, ra_col, line, "raMean")?;
        let dec_deg = parse_coord(&record, dec_col, line, "decMean")?;
        sources.push(Ps1Source {
            ra_deg,
            dec_deg,
            g_ap_mag: parse_mag(&record, g_ap_col),
            r_ap_mag: parse_mag(&record, r_ap_col),
            r_psf_mag: parse_mag(&record, r_psf_col),
        });
    }

    sources.sort_by(|a, b| {
        sort_key(a)
            .partial_cmp(&sort_key(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    Ok(sources)
}

/// Load and parse a saved cone-search response.
pub fn load_cone_csv_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Ps1Source>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_cone_csv(&text)?)
}

fn parse_coord(
    record: &csv::StringRecord,
    col: usize,
    line: usize,
    name: &str,
) -> Result<f64, CatalogError> {
    record
        .get(col)
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| CatalogError::MalformedRow {
            line,
            msg: format!("unparseable {name}"),
        })
}

/// Magnitudes are best-effort: absent column, blank field, unparseable text,
/// and the `-999.0` sentinel all map to `None`.
fn parse_mag(record: &csv::StringRecord, col: Option<usize>) -> Option<f64> {
    let value: f64 = record.get(col?)?.trim().parse().ok()?;
    if value == PS1_MISSING_MAG {
        None
    } else {
        Some(value)
    }
}

fn sort_key(s: &Ps1Source) -> f64 {
    s.r_ap_mag.unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
raMean,decMean,gApMag,rApMag,rPSFMag
150.0100,2.2100,-999.0,18.5,18.4
150.0000,2.2000,18.1,17.8,17.9
150.2000,2.4000,16.2,16.0,-999.0
";

    #[test]
    fn parses_and_sorts_by_r_aperture_mag() {
        let sources = parse_cone_csv(SAMPLE).unwrap();
        assert_eq!(sources.len(), 3);
        // Sorted brightest-first on rApMag
        assert!((sources[0].ra_deg - 150.2000).abs() < 1e-9);
        assert!((sources[1].ra_deg - 150.0000).abs() < 1e-9);
        assert!((sources[2].ra_deg - 150.0100).abs() < 1e-9);
    }

    #[test]
    fn missing_sentinel_maps_to_none() {
        let sources = parse_cone_csv(SAMPLE).unwrap();
        let faint = sources.iter().find(|s| s.r_ap_mag == Some(18.5)).unwrap();
        assert_eq!(faint.g_ap_mag, None);
        let bright = sources.iter().find(|s| s.r_ap_mag == Some(16.0)).unwrap();
        assert_eq!(bright.r_psf_mag, None);
    }

    #[test]
    fn empty_text_is_empty_catalog() {
        assert!(parse_cone_csv("").unwrap().is_empty());
        assert!(parse_cone_csv("  \n").unwrap().is_empty());
    }

    #[test]
    fn missing_position_column_is_an_error() {
        let err = parse_cone_csv("raMean,rPSFMag\n150.0,17.9\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(ref c) if c == "decMean"));
    }

    #[test]
    fn unparseable_position_is_an_error() {
        let err =
            parse_cone_csv("raMean,decMean\n150.0,2.2\nnot-a-number,2.3\n").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedRow { line: 3, .. }));
    }

    #[test]
    fn zero_point_request_renders_url_and_params() {
        let cone = crate::cone::ConeParams {
            ra_deg: 150.0,
            dec_deg: 2.2,
            radius_deg: 0.18,
        };
        let req = Ps1ConeRequest::for_zero_point(&cone);
        req.validate().unwrap();
        assert_eq!(req.url(PS1_BASE_URL), format!("{PS1_BASE_URL}/dr2/stack.csv"));

        let pairs = req.query_pairs();
        assert!(pairs.contains(&("ra".to_string(), "150".to_string())));
        assert!(pairs.contains(&(
            "columns".to_string(),
            "[raMean,decMean,gApMag,rApMag,rPSFMag]".to_string()
        )));
        assert!(pairs.contains(&("rApMag.max".to_string(), "22".to_string())));
    }

    #[test]
    fn detection_table_requires_dr2() {
        let mut req = Ps1ConeRequest::for_zero_point(&crate::cone::ConeParams {
            ra_deg: 0.0,
            dec_deg: 0.0,
            radius_deg: 0.1,
        });
        req.table = Ps1Table::Detection;
        req.release = Ps1Release::Dr1;
        assert!(req.validate().is_err());
        req.release = Ps1Release::Dr2;
        assert!(req.validate().is_ok());
    }
}
