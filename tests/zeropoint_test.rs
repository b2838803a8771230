//! Integration test: parse an observation label, a saved PS1 cone-search
//! response, and a SExtractor catalog, then verify the cross-match and the
//! advised magnitude shift end to end.

use magshift::catalogs::ps1::PS1_BASE_URL;
use magshift::{cone_request_for_label, run_observation, ZeroPointConfig};

const LABEL: &str = "\
PDS_VERSION_ID       = PDS3
OBSERVATION_ID       = 20020131123456
RIGHT_ASCENSION      = 150.0000 <deg>
DECLINATION          = 2.2000 <deg>
HORIZONTAL_PIXEL_FOV = 1.43 <arcsec>
END
";

const PS1_CSV: &str = "\
raMean,decMean,gApMag,rApMag,rPSFMag
150.0100,2.2100,-999.0,18.5,18.4
150.0000,2.2000,18.1,17.8,17.9
150.2000,2.4000,16.2,16.0,15.5
";

const SEXTRACTOR_CATALOG: &str = "\
#   1 NUMBER           Running object number
#   2 ALPHAWIN_J2000   Windowed right ascension (J2000)   [deg]
#   3 DELTAWIN_J2000   Windowed declination (J2000)       [deg]
#   4 MAG_AUTO         Kron-like aperture magnitude       [mag]
         1   150.000400     2.200300  12.9000
         2   150.010200     2.209600  13.0000
         3   150.200100     2.400100  15.0000
         4   151.000000     3.000000  10.0000
";

#[test]
fn test_label_to_cone_request() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = ZeroPointConfig::default();
    let request = cone_request_for_label(LABEL, &config).expect("label should parse");

    assert_eq!(
        request.url(PS1_BASE_URL),
        format!("{PS1_BASE_URL}/dr2/stack.csv")
    );

    let pairs = request.query_pairs();
    assert!(pairs.contains(&("ra".to_string(), "150".to_string())));
    assert!(pairs.contains(&("dec".to_string(), "2.2".to_string())));
    assert!(pairs.contains(&("radius".to_string(), "0.18".to_string())));
    assert!(pairs.contains(&("primaryDetection".to_string(), "1".to_string())));
}

#[test]
fn test_observation_end_to_end() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = ZeroPointConfig::default();
    let report =
        run_observation(PS1_CSV, SEXTRACTOR_CATALOG, &config).expect("catalogs should parse");

    // Three detections fall inside the 0.003 deg tolerance; the fourth is
    // nowhere near a reference star.
    assert_eq!(report.num_references, 3);
    assert_eq!(report.num_detections, 4);
    assert_eq!(report.matches.len(), 3);

    // The match against the 15.5-mag reference is excluded by the 16.0
    // saturation floor; the surviving residuals are 5.0 and 5.4.
    assert_eq!(report.num_used, 2);
    let shift = report.magshift.expect("should produce an estimate");
    assert!(
        (shift - 5.2).abs() < 1e-9,
        "advised magshift was {shift}, expected 5.2"
    );
}

#[test]
fn test_empty_cone_response_yields_no_result() {
    let config = ZeroPointConfig::default();
    let report = run_observation("", SEXTRACTOR_CATALOG, &config).expect("empty CSV is not an error");

    assert_eq!(report.num_references, 0);
    assert!(report.matches.is_empty());
    assert_eq!(report.magshift, None);
}

#[test]
fn test_tighter_tolerance_drops_all_matches() {
    let config = ZeroPointConfig {
        position_tolerance_deg: 0.0001,
        ..Default::default()
    };
    let report = run_observation(PS1_CSV, SEXTRACTOR_CATALOG, &config).unwrap();

    // The closest pair sits ~0.000141 deg apart, outside the tightened
    // tolerance, so nothing matches and no shift is advised.
    assert!(report.matches.is_empty());
    assert_eq!(report.magshift, None);
}
