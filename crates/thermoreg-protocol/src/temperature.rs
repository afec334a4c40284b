//! Fixed-width temperature field codec.
//!
//! Temperatures ride in data frames as four ASCII digits: two integer
//! digits and two fractional digits with the decimal point dropped, so
//! 13.00 travels as `1300` and 42.43 as `4243`. The field carries no sign
//! and cannot represent values outside 0.00 to 99.99.

use crate::constants::PAYLOAD_DIGITS;
use crate::error::{ProtocolError, ProtocolResult};

/// Encode a temperature as the four-digit payload field.
///
/// Values are rendered to two decimal places and zero padded. Negative
/// values, values at or above 100, and values that do not survive
/// rendering (NaN, 99.995 rounding up to 100.00) are range errors.
pub fn encode_temperature(value: f64) -> ProtocolResult<[u8; PAYLOAD_DIGITS]> {
    if !(0.0..100.0).contains(&value) {
        return Err(ProtocolError::TemperatureOutOfRange { value });
    }
    let text = format!("{:05.2}", value);
    let bytes = text.as_bytes();
    if bytes.len() != 5 || bytes[2] != b'.' {
        return Err(ProtocolError::TemperatureOutOfRange { value });
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    // catches the sign of -0.0, which passes the range check
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::TemperatureOutOfRange { value });
    }
    Ok(digits)
}

/// Decode the four-digit payload field back to a temperature.
///
/// The digits split as `NN.NN` and parse as a decimal number.
pub fn decode_temperature(digits: &[u8; PAYLOAD_DIGITS]) -> ProtocolResult<f64> {
    if !digits.iter().all(|b| b.is_ascii_digit()) {
        return Err(ProtocolError::InvalidPayload { digits: *digits });
    }
    let text = format!(
        "{}.{}",
        String::from_utf8_lossy(&digits[..2]),
        String::from_utf8_lossy(&digits[2..])
    );
    text.parse()
        .map_err(|_| ProtocolError::InvalidPayload { digits: *digits })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_drops_point_and_zero_pads() {
        assert_eq!(encode_temperature(13.0).unwrap(), *b"1300");
        assert_eq!(encode_temperature(9.5).unwrap(), *b"0950");
        assert_eq!(encode_temperature(42.43).unwrap(), *b"4243");
        assert_eq!(encode_temperature(0.0).unwrap(), *b"0000");
    }

    #[test]
    fn test_decode_splits_integer_and_fraction() {
        assert_eq!(decode_temperature(b"1300").unwrap(), 13.0);
        assert_eq!(decode_temperature(b"4243").unwrap(), 42.43);
        assert_eq!(decode_temperature(b"0007").unwrap(), 0.07);
    }

    #[test]
    fn test_round_trip_two_decimals() {
        for value in [0.0, 0.01, 7.77, 13.0, 30.0, 55.55, 99.99] {
            let digits = encode_temperature(value).unwrap();
            assert_eq!(decode_temperature(&digits).unwrap(), value);
        }
    }

    #[test]
    fn test_negative_values_rejected() {
        assert!(matches!(
            encode_temperature(-5.0),
            Err(ProtocolError::TemperatureOutOfRange { .. })
        ));
        assert!(encode_temperature(-0.001).is_err());
        assert!(encode_temperature(-0.0).is_err());
    }

    #[test]
    fn test_hundred_and_above_rejected() {
        assert!(encode_temperature(100.0).is_err());
        assert!(encode_temperature(250.0).is_err());
    }

    #[test]
    fn test_rounding_overflow_rejected() {
        // inside the range check, but renders as "100.00"
        assert!(encode_temperature(99.999).is_err());
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(encode_temperature(f64::NAN).is_err());
        assert!(encode_temperature(f64::INFINITY).is_err());
    }

    #[test]
    fn test_non_digit_payloads_fail_decode() {
        assert!(matches!(
            decode_temperature(b"12a4"),
            Err(ProtocolError::InvalidPayload { .. })
        ));
        assert!(decode_temperature(b"    ").is_err());
    }
}
