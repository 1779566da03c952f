// src/latlong/compressed.rs
//! APRS compressed position fields (four base-91 characters per axis)

use super::Axis;
use crate::diagnostic::Conversion;

/// Scale factor applied to `90 - lat`.
const LATITUDE_SCALE: f64 = 380_926.0;
/// Scale factor applied to `180 + lon`.
const LONGITUDE_SCALE: f64 = 190_463.0;
/// Printable offset of base-91 digit zero (`'!'`).
const BASE91_OFFSET: u8 = 33;

/// Encode a latitude as the `YYYY` field of a compressed position.
pub fn latitude_to_comp_str(lat: f64) -> Conversion<String> {
    Axis::Latitude
        .clamp(lat)
        .map(|lat| base91(scaled(LATITUDE_SCALE * (90.0 - lat))))
}

/// Encode a longitude as the `XXXX` field of a compressed position.
pub fn longitude_to_comp_str(lon: f64) -> Conversion<String> {
    Axis::Longitude
        .clamp(lon)
        .map(|lon| base91(scaled(LONGITUDE_SCALE * (180.0 + lon))))
}

fn scaled(value: f64) -> u32 {
    // Clamped input keeps this within 0..=68_566_680.
    value.round() as u32
}

/// Four base-91 digits, most significant first.
fn base91(mut value: u32) -> String {
    let mut digits = [0u8; 4];
    for slot in digits.iter_mut().rev() {
        *slot = (value % 91) as u8 + BASE91_OFFSET;
        value /= 91;
    }
    digits.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_position() {
        // 49°30'N 72°45'W from the APRS protocol reference
        assert_eq!(latitude_to_comp_str(49.5).value, "5L!!");
        assert_eq!(longitude_to_comp_str(-72.75).value, "<*e7");
    }

    #[test]
    fn test_extremes() {
        assert_eq!(latitude_to_comp_str(90.0).value, "!!!!");
        assert_eq!(longitude_to_comp_str(-180.0).value, "!!!!");
        // 68_566_680 = 90*91^3 + 90*91^2
        assert_eq!(latitude_to_comp_str(-90.0).value, "{{!!");
        assert_eq!(longitude_to_comp_str(180.0).value, "{{!!");
    }

    #[test]
    fn test_clamping_matches_boundary() {
        let clamped = latitude_to_comp_str(-100.0);
        assert_eq!(clamped.value, latitude_to_comp_str(-90.0).value);
        assert_eq!(clamped.diagnostics.len(), 1);

        let clamped = longitude_to_comp_str(181.0);
        assert_eq!(clamped.value, longitude_to_comp_str(180.0).value);
        assert!(!clamped.is_clean());
    }

    #[test]
    fn test_alphabet_bounds() {
        for lat in [-90.0, -45.3, 0.0, 12.34, 89.999] {
            let encoded = latitude_to_comp_str(lat).value;
            assert_eq!(encoded.len(), 4);
            assert!(encoded.bytes().all(|b| (b'!'..=b'{').contains(&b)));
        }
    }
}
