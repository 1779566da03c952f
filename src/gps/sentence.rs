// src/gps/sentence.rs
//! NMEA sentence parsing for position-bearing sentences

use super::data::{Fix, SentenceKind};
use crate::diagnostic::Diagnostic;
use crate::latlong::{latitude_from_nmea, longitude_from_nmea};

/// A parsed sentence plus any advisory conditions from its position fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSentence {
    pub fix: Fix,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse a GGA or RMC sentence into a fix.
///
/// Returns `None` for other sentence types, for lines too short to hold
/// the position fields, and for lines whose checksum does not match.
pub fn parse_sentence(line: &str) -> Option<ParsedSentence> {
    let line = line.trim();
    if !line.starts_with('$') || !verify_checksum(line) {
        return None;
    }

    let body = line.split('*').next().unwrap_or(line);
    let parts: Vec<&str> = body.split(',').collect();
    let header = *parts.first()?;
    if header.len() != 6 || !header.is_ascii() {
        return None;
    }
    let talker = &header[1..3];

    match &header[3..] {
        "GGA" => parse_gga(talker, &parts),
        "RMC" => parse_rmc(talker, &parts),
        _ => None,
    }
}

/// Check the `*hh` suffix if one is present.
///
/// Sentences without a checksum are accepted.
pub fn verify_checksum(line: &str) -> bool {
    let Some(body) = line.strip_prefix('$') else {
        return false;
    };
    let Some((payload, checksum)) = body.split_once('*') else {
        return true;
    };
    let Ok(expected) = u8::from_str_radix(checksum.trim(), 16) else {
        return false;
    };

    payload.bytes().fold(0u8, |acc, b| acc ^ b) == expected
}

/// Parse GGA (Global Positioning System Fix Data) sentence
fn parse_gga(talker: &str, parts: &[&str]) -> Option<ParsedSentence> {
    if parts.len() < 7 {
        return None;
    }

    let mut fix = Fix::new(SentenceKind::Gga, talker);
    let mut diagnostics = Vec::new();

    // Latitude (fields 2 and 3), longitude (fields 4 and 5)
    read_position(&mut fix, &mut diagnostics, &parts[2..6]);

    // Fix quality (field 6), 0 means invalid
    fix.valid = parts[6].parse::<u8>().map_or(false, |quality| quality > 0);

    Some(ParsedSentence { fix, diagnostics })
}

/// Parse RMC (Recommended Minimum Course) sentence
fn parse_rmc(talker: &str, parts: &[&str]) -> Option<ParsedSentence> {
    if parts.len() < 7 {
        return None;
    }

    let mut fix = Fix::new(SentenceKind::Rmc, talker);
    let mut diagnostics = Vec::new();

    // Status (field 2), 'V' means void
    fix.valid = parts[2] == "A";

    // Latitude (fields 3 and 4), longitude (fields 5 and 6)
    read_position(&mut fix, &mut diagnostics, &parts[3..7]);

    Some(ParsedSentence { fix, diagnostics })
}

/// Decode `[lat, N/S, lon, E/W]` into the fix.
fn read_position(fix: &mut Fix, diagnostics: &mut Vec<Diagnostic>, fields: &[&str]) {
    if !fields[0].is_empty() {
        let lat = latitude_from_nmea(fields[0], fields[1]);
        fix.latitude = lat.value;
        diagnostics.extend(lat.diagnostics);
    }

    if !fields[2].is_empty() {
        let lon = longitude_from_nmea(fields[2], fields[3]);
        fix.longitude = lon.value;
        diagnostics.extend(lon.diagnostics);
    }
}
