// src/latlong/uncompressed.rs
//! APRS uncompressed position fields: `ddmm.mmN` and `dddmm.mmW`

use super::{split_degrees, Axis, MAX_AMBIGUITY};
use crate::diagnostic::Conversion;

/// Encode a latitude as `ddmm.mm` followed by `N` or `S`.
///
/// `ambiguity` 1..=4 blanks that many trailing digits; anything above 4
/// is treated as 4. Out-of-range input is clamped and reported.
pub fn latitude_to_str(lat: f64, ambiguity: u8) -> Conversion<String> {
    encode(Axis::Latitude, lat, ambiguity)
}

/// Encode a longitude as `dddmm.mm` followed by `E` or `W`.
///
/// Ambiguity applies to longitude the same way, one column further right.
pub fn longitude_to_str(lon: f64, ambiguity: u8) -> Conversion<String> {
    encode(Axis::Longitude, lon, ambiguity)
}

fn encode(axis: Axis, degrees: f64, ambiguity: u8) -> Conversion<String> {
    axis.clamp(degrees).map(|degrees| {
        let hemisphere = axis.hemisphere(degrees);
        let (whole, minutes) = split_degrees(degrees.abs(), 5, 2);
        let token = format!(
            "{:0digits$}{}{}",
            whole,
            minutes,
            hemisphere.as_char(),
            digits = axis.degree_digits()
        );
        blank_ambiguous(axis, &token, ambiguity)
    })
}

/// Replace the digits hidden by `ambiguity` with spaces.
fn blank_ambiguous(axis: Axis, token: &str, ambiguity: u8) -> String {
    let level = usize::from(ambiguity.min(MAX_AMBIGUITY));
    let hidden = &axis.ambiguity_offsets()[..level];

    token
        .char_indices()
        .map(|(i, c)| if hidden.contains(&i) { ' ' } else { c })
        .collect()
}
