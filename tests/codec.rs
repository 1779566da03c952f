//! Reference values for the public conversion functions

use aprs_latlong::{
    diagnostic::CollectingSink, latitude_from_nmea, latitude_to_comp_str, latitude_to_nmea,
    latitude_to_str, longitude_from_nmea, longitude_to_comp_str, longitude_to_nmea,
    longitude_to_str, Axis, Diagnostic, Hemisphere, PositionReport, UNKNOWN_COORDINATE,
};

#[test]
fn test_uncompressed_reference_strings() {
    assert_eq!(longitude_to_str(-122.345, 0).value, "12220.70W");
    assert_eq!(latitude_to_str(48.1173, 0).value, "4807.04N");
    // Level 2 hides both hundredths and tenths of a minute
    assert_eq!(latitude_to_str(48.1173, 2).value, "4807.  N");
}

#[test]
fn test_compressed_reference_strings() {
    assert_eq!(latitude_to_comp_str(49.5).value, "5L!!");
    assert_eq!(longitude_to_comp_str(-72.75).value, "<*e7");

    let north = latitude_to_comp_str(90.0).value;
    let equator = latitude_to_comp_str(0.0).value;
    let south = latitude_to_comp_str(-90.0).value;
    assert!(north < equator && equator < south);

    let west = longitude_to_comp_str(-180.0).value;
    let prime = longitude_to_comp_str(0.0).value;
    let east = longitude_to_comp_str(180.0).value;
    assert!(west < prime && prime < east);
}

#[test]
fn test_nmea_round_trip_reference() {
    let field = latitude_to_nmea(Some(40.5)).value;
    assert_eq!(field.digits, "4030.0000");
    assert_eq!(field.hemisphere, Some(Hemisphere::North));

    let decoded = latitude_from_nmea("4030.0000", "N").value;
    assert_eq!(decoded, Some(40.5));
}

#[test]
fn test_unknown_pass_through() {
    let lat = latitude_to_nmea(UNKNOWN_COORDINATE).value;
    let lon = longitude_to_nmea(UNKNOWN_COORDINATE).value;
    assert_eq!((lat.digits.as_str(), lat.hemisphere_field().as_str()), ("", ""));
    assert_eq!((lon.digits.as_str(), lon.hemisphere_field().as_str()), ("", ""));

    assert_eq!(latitude_from_nmea("40300.000", "N").value, UNKNOWN_COORDINATE);
    assert_eq!(longitude_from_nmea("0745.0000", "W").value, UNKNOWN_COORDINATE);
}

#[test]
fn test_boundary_clamp_reports_once() {
    let sink = CollectingSink::new();

    let clamped = latitude_to_str(95.0, 0).report(&sink);
    assert_eq!(clamped, latitude_to_str(90.0, 0).value);

    let clamped = longitude_to_str(-185.0, 0).report(&sink);
    assert_eq!(clamped, longitude_to_str(-180.0, 0).value);

    let reported = sink.drain();
    assert_eq!(reported.len(), 2);
    assert_eq!(reported[0].axis(), Axis::Latitude);
    assert_eq!(reported[1].axis(), Axis::Longitude);
}

#[test]
fn test_empty_hemisphere_is_positive() {
    // A sentence may leave the hemisphere blank. The decoder does not
    // guess a sign and does not look at the sentence status; the value
    // comes back positive and unflagged.
    let result = longitude_from_nmea("07245.0000", "");
    assert_eq!(result.value, Some(72.75));
    assert!(result.is_clean());
}

#[test]
fn test_lenient_decode_reports_but_returns() {
    let result = longitude_from_nmea("18100.0000", "X");
    assert_eq!(result.value, Some(181.0));
    assert_eq!(
        result.diagnostics,
        vec![
            Diagnostic::OutOfRange {
                axis: Axis::Longitude,
                value: 181.0
            },
            Diagnostic::UnexpectedHemisphere {
                axis: Axis::Longitude,
                found: "X".to_string()
            },
        ]
    );
}

#[test]
fn test_position_report_json_shape() {
    let report = PositionReport::new(Some(-33.8688), Some(151.2093), 0);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

    assert_eq!(json["aprs_latitude"], "3352.13S");
    assert_eq!(json["aprs_longitude"], "15112.56E");
    assert_eq!(json["nmea_latitude"]["digits"], "3352.1280");
    assert_eq!(json["diagnostics"].as_array().map(Vec::len), Some(0));
}
