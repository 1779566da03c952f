// src/latlong/mod.rs
//! Latitude/longitude text encodings for APRS and NMEA-0183
//!
//! Every conversion here is a pure function. Advisory conditions (clamped
//! input, implausible decoded values) travel back alongside the value in a
//! [`Conversion`] instead of being printed from inside the math.

pub mod compressed;
pub mod nmea;
pub mod uncompressed;

use crate::diagnostic::{Conversion, Diagnostic};
use serde::{Deserialize, Serialize};
use std::fmt;

pub use compressed::{latitude_to_comp_str, longitude_to_comp_str};
pub use nmea::{
    latitude_from_nmea, latitude_to_nmea, longitude_from_nmea, longitude_to_nmea, NmeaField,
};
pub use uncompressed::{latitude_to_str, longitude_to_str};

/// A coordinate in degrees, or `None` when there is no fix.
pub type Coordinate = Option<f64>;

/// The "no fix / not available" coordinate.
pub const UNKNOWN_COORDINATE: Coordinate = None;

/// Highest meaningful position ambiguity level.
pub const MAX_AMBIGUITY: u8 = 4;

/// Which of the two axes a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Number of integer-degree digits in the encoded forms.
    pub fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    /// Largest legal magnitude in degrees.
    pub fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Hemisphere for a signed degree value. Zero counts as positive.
    pub fn hemisphere(self, degrees: f64) -> Hemisphere {
        match (self, degrees < 0.0) {
            (Axis::Latitude, false) => Hemisphere::North,
            (Axis::Latitude, true) => Hemisphere::South,
            (Axis::Longitude, false) => Hemisphere::East,
            (Axis::Longitude, true) => Hemisphere::West,
        }
    }

    /// Character offsets blanked by ambiguity levels 1 through 4, in order.
    ///
    /// Offsets index into the encoded token (`ddmm.mmH` / `dddmm.mmH`).
    pub fn ambiguity_offsets(self) -> [usize; 4] {
        match self {
            Axis::Latitude => [6, 5, 3, 2],
            Axis::Longitude => [7, 6, 4, 3],
        }
    }

    /// Clamp a degree value into the legal range for this axis.
    ///
    /// NaN has no sensible nearest boundary and is replaced by zero.
    pub fn clamp(self, degrees: f64) -> Conversion<f64> {
        let limit = self.limit();
        if degrees.is_nan() {
            return Conversion::with(0.0, Diagnostic::NotFinite { axis: self });
        }
        if degrees < -limit || degrees > limit {
            let clamped = degrees.clamp(-limit, limit);
            return Conversion::with(
                clamped,
                Diagnostic::Clamped {
                    axis: self,
                    original: degrees,
                    clamped,
                },
            );
        }
        Conversion::clean(degrees)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "Latitude"),
            Axis::Longitude => write!(f, "Longitude"),
        }
    }
}

/// Hemisphere indicator carried next to the numeric field.
///
/// Serialized as its single wire letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "char", try_from = "char")]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// Single-letter wire form.
    pub fn as_char(self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'N' => Some(Hemisphere::North),
            'S' => Some(Hemisphere::South),
            'E' => Some(Hemisphere::East),
            'W' => Some(Hemisphere::West),
            _ => None,
        }
    }

    /// South and West carry negative degrees.
    pub fn is_negative(self) -> bool {
        matches!(self, Hemisphere::South | Hemisphere::West)
    }

    pub fn axis(self) -> Axis {
        match self {
            Hemisphere::North | Hemisphere::South => Axis::Latitude,
            Hemisphere::East | Hemisphere::West => Axis::Longitude,
        }
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl From<Hemisphere> for char {
    fn from(hemisphere: Hemisphere) -> Self {
        hemisphere.as_char()
    }
}

impl TryFrom<char> for Hemisphere {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Hemisphere::from_char(c).ok_or_else(|| format!("unknown hemisphere '{}'", c))
    }
}

/// Split a non-negative degree value into whole degrees and minutes text.
///
/// Minutes are formatted zero-padded to `width` with `precision` fractional
/// digits. Rounding can turn 59.99.. into "60.00"; that case is folded back
/// into the degrees so the minutes never start with '6'.
pub(crate) fn split_degrees(magnitude: f64, width: usize, precision: usize) -> (u32, String) {
    let mut whole = magnitude.trunc() as u32;
    let minutes = (magnitude - f64::from(whole)) * 60.0;

    let mut text = format!("{:0width$.precision$}", minutes, width = width, precision = precision);
    if text.starts_with('6') {
        text.replace_range(0..1, "0");
        whole += 1;
    }

    (whole, text)
}
