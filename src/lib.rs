// src/lib.rs
//! APRS / NMEA Coordinate Codec
//!
//! Converts latitude and longitude between floating point degrees and the
//! fixed-width text fields used by APRS position reports (uncompressed and
//! base-91 compressed) and NMEA-0183 sentences.

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod gps;
pub mod latlong;
pub mod monitor;
pub mod report;

// Re-export main types for convenience
pub use diagnostic::{Conversion, Diagnostic, DiagnosticSink, NoOpSink, TracingSink};
pub use error::{CodecError, Result};
pub use latlong::{
    latitude_from_nmea, latitude_to_comp_str, latitude_to_nmea, latitude_to_str,
    longitude_from_nmea, longitude_to_comp_str, longitude_to_nmea, longitude_to_str, Axis,
    Coordinate, Hemisphere, NmeaField, UNKNOWN_COORDINATE,
};
pub use monitor::{FeedSource, PositionMonitor};
pub use report::PositionReport;
