// src/latlong/nmea.rs
//! NMEA-0183 latitude/longitude fields
//!
//! Encoding produces the numeric field (`ddmm.mmmm` / `dddmm.mmmm`) and the
//! hemisphere field separately, the way they sit between commas in a
//! sentence. Decoding is lenient: only the leading digit and the decimal
//! point position are checked, everything else is reported and accepted.

use super::{split_degrees, Axis, Coordinate, Hemisphere};
use crate::diagnostic::{Conversion, Diagnostic};
use serde::Serialize;

/// Numeric field and hemisphere field of one NMEA coordinate.
///
/// An unknown coordinate is represented by both fields being empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NmeaField {
    pub digits: String,
    pub hemisphere: Option<Hemisphere>,
}

impl NmeaField {
    /// Both fields empty.
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_unknown(&self) -> bool {
        self.digits.is_empty() && self.hemisphere.is_none()
    }

    /// Hemisphere as it appears on the wire: one letter, or empty.
    pub fn hemisphere_field(&self) -> String {
        self.hemisphere.map(|h| h.as_char().to_string()).unwrap_or_default()
    }
}

/// Encode a latitude for an NMEA sentence: `ddmm.mmmm` plus `N`/`S`.
pub fn latitude_to_nmea(lat: Coordinate) -> Conversion<NmeaField> {
    encode(Axis::Latitude, lat)
}

/// Encode a longitude for an NMEA sentence: `dddmm.mmmm` plus `E`/`W`.
pub fn longitude_to_nmea(lon: Coordinate) -> Conversion<NmeaField> {
    encode(Axis::Longitude, lon)
}

fn encode(axis: Axis, degrees: Coordinate) -> Conversion<NmeaField> {
    let Some(degrees) = degrees else {
        return Conversion::clean(NmeaField::unknown());
    };

    axis.clamp(degrees).map(|degrees| {
        let (whole, minutes) = split_degrees(degrees.abs(), 7, 4);
        NmeaField {
            digits: format!("{:0digits$}{}", whole, minutes, digits = axis.degree_digits()),
            hemisphere: Some(axis.hemisphere(degrees)),
        }
    })
}

/// Decode an NMEA latitude field (`ddmm.mmm...`) and its hemisphere.
///
/// Returns `None` when the field is malformed. A missing hemisphere
/// leaves the value positive.
pub fn latitude_from_nmea(digits: &str, hemisphere: &str) -> Conversion<Coordinate> {
    decode(Axis::Latitude, digits, hemisphere)
}

/// Decode an NMEA longitude field (`dddmm.mmm...`) and its hemisphere.
pub fn longitude_from_nmea(digits: &str, hemisphere: &str) -> Conversion<Coordinate> {
    decode(Axis::Longitude, digits, hemisphere)
}

fn decode(axis: Axis, field: &str, hemisphere: &str) -> Conversion<Coordinate> {
    let Some(magnitude) = parse_magnitude(axis, field) else {
        return Conversion::clean(None);
    };

    let mut result = Conversion::clean(Some(magnitude));

    if !(0.0..=axis.limit()).contains(&magnitude) {
        result.push(Diagnostic::OutOfRange {
            axis,
            value: magnitude,
        });
    }

    // Only the first character matters, matching how receivers have
    // always treated this field.
    let sign = match hemisphere.chars().next() {
        None => 1.0,
        Some(c) => match Hemisphere::from_char(c) {
            Some(h) if h.axis() == axis => {
                if h.is_negative() {
                    -1.0
                } else {
                    1.0
                }
            }
            _ => {
                result.push(Diagnostic::UnexpectedHemisphere {
                    axis,
                    found: hemisphere.to_string(),
                });
                1.0
            }
        },
    };

    result.map(|value| value.map(|m| m * sign))
}

/// Unsigned degrees from a `d..dmm.mmm` field, or `None` if malformed.
fn parse_magnitude(axis: Axis, field: &str) -> Option<f64> {
    let bytes = field.as_bytes();
    let width = axis.degree_digits();

    if bytes.get(width + 2) != Some(&b'.') {
        return None;
    }
    let degree_bytes = &bytes[..width];
    if !degree_bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }

    let degrees = degree_bytes
        .iter()
        .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
    let minutes = leading_number(&field[width..]);

    Some(f64::from(degrees) + minutes / 60.0)
}

/// Parse the longest `[sign]digits[.digits]` prefix, ignoring whatever follows.
///
/// Receivers emit anywhere from two to four fractional digits and some
/// glue the checksum on, so trailing junk is tolerated. Leading whitespace
/// is skipped. No digits at all reads as zero.
fn leading_number(text: &str) -> f64 {
    let text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let mut end = 0;
    let mut seen_point = false;
    for (i, c) in text.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => end = i + 1,
            '.' if !seen_point => {
                seen_point = true;
                end = i + 1;
            }
            _ => break,
        }
    }

    text[..end].parse::<f64>().unwrap_or(0.0)
}
