// src/report.rs
//! Every encoding of one position, for printing or JSON output

use crate::diagnostic::{Conversion, Diagnostic};
use crate::gps::Fix;
use crate::latlong::{
    latitude_to_comp_str, latitude_to_nmea, latitude_to_str, longitude_to_comp_str,
    longitude_to_nmea, longitude_to_str, Coordinate, NmeaField,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// APRS and NMEA renderings of a latitude/longitude pair.
///
/// The APRS fields are `None` when the coordinate is unknown; those
/// formats have no empty representation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionReport {
    pub timestamp: Option<DateTime<Utc>>,
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub ambiguity: u8,
    pub aprs_latitude: Option<String>,
    pub aprs_longitude: Option<String>,
    pub compressed_latitude: Option<String>,
    pub compressed_longitude: Option<String>,
    pub nmea_latitude: NmeaField,
    pub nmea_longitude: NmeaField,
    pub diagnostics: Vec<Diagnostic>,
}

impl PositionReport {
    /// Encode a coordinate pair every supported way.
    pub fn new(latitude: Coordinate, longitude: Coordinate, ambiguity: u8) -> Self {
        let mut diagnostics = Vec::new();
        let mut take = |conversion: Conversion<String>| {
            diagnostics.extend(conversion.diagnostics);
            conversion.value
        };

        let aprs_latitude = latitude.map(|lat| take(latitude_to_str(lat, ambiguity)));
        let aprs_longitude = longitude.map(|lon| take(longitude_to_str(lon, ambiguity)));
        let compressed_latitude = latitude.map(|lat| take(latitude_to_comp_str(lat)));
        let compressed_longitude = longitude.map(|lon| take(longitude_to_comp_str(lon)));

        // The NMEA encoders clamp the same input again; their diagnostics
        // would only repeat what was already collected.
        let nmea_latitude = latitude_to_nmea(latitude).into_value();
        let nmea_longitude = longitude_to_nmea(longitude).into_value();

        Self {
            timestamp: None,
            latitude,
            longitude,
            ambiguity,
            aprs_latitude,
            aprs_longitude,
            compressed_latitude,
            compressed_longitude,
            nmea_latitude,
            nmea_longitude,
            diagnostics,
        }
    }

    /// Encode the position of a received fix.
    pub fn from_fix(fix: &Fix, ambiguity: u8) -> Self {
        let mut report = Self::new(fix.latitude, fix.longitude, ambiguity);
        report.timestamp = Some(fix.timestamp);
        report
    }

    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for PositionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let missing = "-".to_string();

        if let Some(ts) = self.timestamp {
            writeln!(f, "Time:       {}", ts.format("%Y-%m-%d %H:%M:%S UTC"))?;
        }
        writeln!(
            f,
            "Position:   {} {}",
            Fix::format_coordinate(self.latitude).trim(),
            Fix::format_coordinate(self.longitude).trim()
        )?;
        writeln!(
            f,
            "APRS:       {}/{} (ambiguity {})",
            self.aprs_latitude.as_ref().unwrap_or(&missing),
            self.aprs_longitude.as_ref().unwrap_or(&missing),
            self.ambiguity
        )?;
        writeln!(
            f,
            "Compressed: {}{}",
            self.compressed_latitude.as_ref().unwrap_or(&missing),
            self.compressed_longitude.as_ref().unwrap_or(&missing)
        )?;
        write!(
            f,
            "NMEA:       {},{},{},{}",
            self.nmea_latitude.digits,
            self.nmea_latitude.hemisphere_field(),
            self.nmea_longitude.digits,
            self.nmea_longitude.hemisphere_field()
        )?;
        for diagnostic in &self.diagnostics {
            write!(f, "\nWarning:    {}", diagnostic)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gps::SentenceKind;

    #[test]
    fn test_report_fields() {
        let report = PositionReport::new(Some(49.5), Some(-72.75), 0);

        assert!(report.has_position());
        assert_eq!(report.aprs_latitude.as_deref(), Some("4930.00N"));
        assert_eq!(report.aprs_longitude.as_deref(), Some("07245.00W"));
        assert_eq!(report.compressed_latitude.as_deref(), Some("5L!!"));
        assert_eq!(report.compressed_longitude.as_deref(), Some("<*e7"));
        assert_eq!(report.nmea_latitude.digits, "4930.0000");
        assert_eq!(report.nmea_longitude.digits, "07245.0000");
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_report_unknown_longitude() {
        let report = PositionReport::new(Some(10.0), None, 0);

        assert!(!report.has_position());
        assert_eq!(report.aprs_longitude, None);
        assert_eq!(report.compressed_longitude, None);
        assert!(report.nmea_longitude.is_unknown());
    }

    #[test]
    fn test_report_collects_clamp_once_per_encoding() {
        let report = PositionReport::new(Some(91.0), Some(0.0), 2);
        // uncompressed + compressed
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.aprs_latitude.as_deref(), Some("9000.  N"));
    }

    #[test]
    fn test_report_from_fix() {
        let mut fix = Fix::new(SentenceKind::Rmc, "GP");
        fix.latitude = Some(-33.5);
        fix.longitude = Some(151.25);
        fix.valid = true;

        let report = PositionReport::from_fix(&fix, 1);
        assert_eq!(report.timestamp, Some(fix.timestamp));
        assert_eq!(report.aprs_latitude.as_deref(), Some("3330.0 S"));
        assert_eq!(report.aprs_longitude.as_deref(), Some("15115.0 E"));
    }

    #[test]
    fn test_display_and_json() {
        let report = PositionReport::new(Some(40.5), Some(-74.0), 0);

        let text = report.to_string();
        assert!(text.contains("APRS:       4030.00N/07400.00W"));
        assert!(text.contains("NMEA:       4030.0000,N,07400.0000,W"));

        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["aprs_latitude"], "4030.00N");
        assert_eq!(json["nmea_longitude"]["hemisphere"], "W");
    }
}
