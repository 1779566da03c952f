// src/gps/data.rs
//! Position fixes extracted from NMEA sentences

use crate::latlong::Coordinate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Sentence types that carry a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SentenceKind {
    /// Global Positioning System Fix Data
    Gga,
    /// Recommended Minimum Specific GNSS Data
    Rmc,
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentenceKind::Gga => write!(f, "GGA"),
            SentenceKind::Rmc => write!(f, "RMC"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fix {
    pub timestamp: DateTime<Utc>,
    pub kind: SentenceKind,
    pub talker: String,         // GP, GN, GL, ...
    pub latitude: Coordinate,
    pub longitude: Coordinate,
    pub valid: bool,            // RMC status 'A' or GGA quality > 0
    pub source: Option<String>, // Serial port, file, stdin
}

impl Fix {
    pub fn new(kind: SentenceKind, talker: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            talker: talker.to_string(),
            latitude: None,
            longitude: None,
            valid: false,
            source: None,
        }
    }

    /// Valid status and both coordinates present
    pub fn has_fix(&self) -> bool {
        self.valid && self.latitude.is_some() && self.longitude.is_some()
    }

    /// Set the data source
    pub fn set_source(&mut self, source: &str) {
        self.source = Some(source.to_string());
    }

    /// Format coordinate for display
    pub fn format_coordinate(coord: Coordinate) -> String {
        match coord {
            Some(val) => format!("{:>12.6}°", val),
            None => "No fix".to_string(),
        }
    }
}
