//! Primitive decoders
//!
//! One pure function per physical-quantity encoding. Each consumes the data
//! bytes of a single PID response (mode and PID bytes already stripped).

use crate::bits::BitView;
use crate::decoder::Decoded;
use crate::error::{require, require_at_most, CodecResult, DecodeError};
use crate::scaling::{self, bytes_to_int, twos_complement, MAX_INT_BYTES};
use crate::tables::{self, AIR_STATUS, FUEL_STATUS, FUEL_TYPES, OBD_COMPLIANCE};
use crate::unit::{Measurement, Unit};
use tracing::{debug, warn};

/// `A * 100 / 255`
pub fn percent(bytes: &[u8]) -> CodecResult<Measurement> {
    require("percent", bytes, 1)?;
    Ok(Measurement::new(bytes[0] as f64 * 100.0 / 255.0, Unit::Percent))
}

/// `(A - 128) * 100 / 128`
pub fn percent_centered(bytes: &[u8]) -> CodecResult<Measurement> {
    require("percent centered", bytes, 1)?;
    Ok(Measurement::new(
        (bytes[0] as f64 - 128.0) * 100.0 / 128.0,
        Unit::Percent,
    ))
}

/// Whole span minus 40
pub fn temperature(bytes: &[u8]) -> CodecResult<Measurement> {
    require("temperature", bytes, 1)?;
    require_at_most("temperature", bytes, MAX_INT_BYTES)?;
    Ok(Measurement::new(
        bytes_to_int(bytes) as f64 - 40.0,
        Unit::Celsius,
    ))
}

/// Absolute pressure in kPa, `A`
pub fn pressure(bytes: &[u8]) -> CodecResult<Measurement> {
    require("pressure", bytes, 1)?;
    Ok(Measurement::new(bytes[0] as f64, Unit::Kilopascal))
}

/// Gauge fuel pressure, `A * 3`
pub fn fuel_pressure(bytes: &[u8]) -> CodecResult<Measurement> {
    require("fuel pressure", bytes, 1)?;
    Ok(Measurement::new(bytes[0] as f64 * 3.0, Unit::Kilopascal))
}

/// Degrees before top dead centre, `(A - 128) / 2`
pub fn timing_advance(bytes: &[u8]) -> CodecResult<Measurement> {
    require("timing advance", bytes, 1)?;
    Ok(Measurement::new(
        (bytes[0] as f64 - 128.0) / 2.0,
        Unit::Degree,
    ))
}

/// Narrow-band oxygen sensor voltage, `A / 200`
pub fn sensor_voltage(bytes: &[u8]) -> CodecResult<Measurement> {
    require("sensor voltage", bytes, 1)?;
    Ok(Measurement::new(bytes[0] as f64 / 200.0, Unit::Volt))
}

/// Wide-band sensor voltage from the final two bytes, `raw * 8 / 65535`
pub fn sensor_voltage_big(bytes: &[u8]) -> CodecResult<Measurement> {
    require("sensor voltage", bytes, 2)?;
    let raw = bytes_to_int(&bytes[bytes.len() - 2..]);
    Ok(Measurement::new(raw as f64 * 8.0 / 65535.0, Unit::Volt))
}

/// Wide-band sensor current from the final two bytes, `raw / 256 - 128`
pub fn current_centered(bytes: &[u8]) -> CodecResult<Measurement> {
    require("current centered", bytes, 2)?;
    let raw = bytes_to_int(&bytes[bytes.len() - 2..]);
    Ok(Measurement::new(
        raw as f64 / 256.0 - 128.0,
        Unit::Milliampere,
    ))
}

/// Whole span `* 100 / 255`
pub fn absolute_load(bytes: &[u8]) -> CodecResult<Measurement> {
    require("absolute load", bytes, 1)?;
    require_at_most("absolute load", bytes, MAX_INT_BYTES)?;
    Ok(Measurement::new(
        bytes_to_int(bytes) as f64 * 100.0 / 255.0,
        Unit::Percent,
    ))
}

/// Maximum air flow rate, `A * 10`
pub fn max_maf(bytes: &[u8]) -> CodecResult<Measurement> {
    require("max maf", bytes, 1)?;
    Ok(Measurement::new(bytes[0] as f64 * 10.0, Unit::GramsPerSecond))
}

/// Absolute evap vapor pressure, `raw / 200`
pub fn abs_evap_pressure(bytes: &[u8]) -> CodecResult<Measurement> {
    require("absolute evap pressure", bytes, 2)?;
    Ok(Measurement::new(
        bytes_to_int(&bytes[..2]) as f64 / 200.0,
        Unit::Kilopascal,
    ))
}

/// Evap vapor pressure from two independently signed bytes, `(A * 256 + B) / 4`
pub fn evap_pressure(bytes: &[u8]) -> CodecResult<Measurement> {
    require("evap pressure", bytes, 2)?;
    let a = twos_complement(bytes[0] as i64, 8) as f64;
    let b = twos_complement(bytes[1] as i64, 8) as f64;
    Ok(Measurement::new((a * 256.0 + b) / 4.0, Unit::Kilopascal))
}

/// Evap vapor pressure, `raw - 32767`
pub fn evap_pressure_alt(bytes: &[u8]) -> CodecResult<Measurement> {
    require("evap pressure", bytes, 2)?;
    Ok(Measurement::new(
        bytes_to_int(&bytes[..2]) as f64 - 32767.0,
        Unit::Pascal,
    ))
}

/// Fuel injection timing, `(raw - 26880) / 128`
pub fn inject_timing(bytes: &[u8]) -> CodecResult<Measurement> {
    require("injection timing", bytes, 2)?;
    Ok(Measurement::new(
        (bytes_to_int(&bytes[..2]) as f64 - 26880.0) / 128.0,
        Unit::Degree,
    ))
}

/// Engine fuel rate, `raw * 0.05`
pub fn fuel_rate(bytes: &[u8]) -> CodecResult<Measurement> {
    require("fuel rate", bytes, 2)?;
    Ok(Measurement::new(
        bytes_to_int(&bytes[..2]) as f64 * 0.05,
        Unit::LitersPerHour,
    ))
}

/// Raw counter over the whole span
pub fn count(bytes: &[u8]) -> CodecResult<Measurement> {
    require("count", bytes, 1)?;
    require_at_most("count", bytes, MAX_INT_BYTES)?;
    Ok(Measurement::new(bytes_to_int(bytes) as f64, Unit::Count))
}

/// Scale the whole span with a fixed units-and-scaling id
pub fn uas(id: u8, bytes: &[u8]) -> CodecResult<Measurement> {
    require("scaled value", bytes, 1)?;
    scaling::decode(id, bytes)
}

/// Fuel type name indexed by `A`
pub fn fuel_type(bytes: &[u8]) -> CodecResult<String> {
    require("fuel type", bytes, 1)?;
    tables::lookup("fuel type", &FUEL_TYPES, bytes[0] as usize).map(str::to_string)
}

/// OBD standard indexed by `A`
pub fn obd_compliance(bytes: &[u8]) -> CodecResult<String> {
    require("obd compliance", bytes, 1)?;
    tables::lookup("obd compliance", &OBD_COMPLIANCE, bytes[0] as usize).map(str::to_string)
}

/// Table position of the single set bit in `byte`, counted from the LSB
fn single_bit_position(field: &'static str, byte: u8) -> CodecResult<usize> {
    let bytes = [byte];
    let bits = BitView::new(&bytes);
    let set_bits = bits.count_ones();
    match bits.index_of(true) {
        Some(msb_index) if set_bits == 1 => Ok(7 - msb_index),
        _ => {
            debug!(field, set_bits, "Invalid response, expected exactly one set bit");
            Err(DecodeError::InvalidBitPattern { field, set_bits })
        }
    }
}

fn fuel_status_half(field: &'static str, byte: u8) -> CodecResult<&'static str> {
    let position = single_bit_position(field, byte)?;
    tables::lookup("fuel status", &FUEL_STATUS, position)
}

/// Fuel system status for both banks.
///
/// Each byte must have exactly one bit set. With `allow_partial`, one
/// failing byte is reported as an issue and the other is still returned.
pub fn fuel_status(bytes: &[u8], allow_partial: bool) -> CodecResult<Decoded<String>> {
    require("fuel status", bytes, 2)?;
    let first = fuel_status_half("fuel status 1", bytes[0]);
    let second = fuel_status_half("fuel status 2", bytes[1]);

    match (first, second) {
        (Ok(a), Ok(b)) => Ok(Decoded::new(format!("Status 1: {}, Status 2: {}", a, b))),
        (Err(err), Err(_)) => Err(err),
        (Ok(a), Err(err)) if allow_partial => {
            warn!("Fuel status 2 unreadable, returning status 1 only: {}", err);
            Ok(Decoded::with_issues(format!("Status 1: {}", a), vec![err]))
        }
        (Err(err), Ok(b)) if allow_partial => {
            warn!("Fuel status 1 unreadable, returning status 2 only: {}", err);
            Ok(Decoded::with_issues(format!("Status 2: {}", b), vec![err]))
        }
        (Ok(_), Err(err)) | (Err(err), Ok(_)) => Err(err),
    }
}

/// Commanded secondary air status
pub fn air_status(bytes: &[u8]) -> CodecResult<String> {
    require("air status", bytes, 1)?;
    let position = single_bit_position("air status", bytes[0])?;
    tables::lookup("air status", &AIR_STATUS, position).map(str::to_string)
}

fn bank_summary(bytes: &[u8], banks: usize) -> String {
    let bits = BitView::new(&bytes[..1]);
    let width = 8 / banks;
    (0..banks)
        .map(|bank| {
            let start = bank * width;
            format!(
                "Bank {}: {:0width$b}",
                bank + 1,
                bits.value_at(start..=start + width - 1),
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Oxygen sensors present, two banks of four sensors
pub fn o2_sensors(bytes: &[u8]) -> CodecResult<String> {
    require("o2 sensors", bytes, 1)?;
    Ok(bank_summary(bytes, 2))
}

/// Oxygen sensors present, four banks of two sensors
pub fn o2_sensors_alt(bytes: &[u8]) -> CodecResult<String> {
    require("o2 sensors", bytes, 1)?;
    Ok(bank_summary(bytes, 4))
}

/// Power take-off status, first bit
pub fn aux_input_status(bytes: &[u8]) -> CodecResult<bool> {
    require("aux input status", bytes, 1)?;
    Ok(BitView::new(bytes).bit(0))
}

/// Supported-PID bitmap as '0'/'1' characters, first PID first
pub fn supported_pids(bytes: &[u8]) -> CodecResult<String> {
    require("supported pids", bytes, 1)?;
    Ok(BitView::new(bytes)
        .iter()
        .map(|bit| if bit { '1' } else { '0' })
        .collect())
}

/// UTF-8 text with every non-alphanumeric character removed
pub fn encoded_string(bytes: &[u8]) -> CodecResult<String> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        debug!("Encoded string is not valid UTF-8: {}", e);
        DecodeError::MalformedText(e.to_string())
    })?;
    Ok(text.chars().filter(|c| c.is_alphanumeric()).collect())
}

/// Calibration verification numbers, one 8-digit hex word per 4 bytes
pub fn cvn(bytes: &[u8]) -> CodecResult<String> {
    require("cvn", bytes, 4)?;
    let remainder = bytes.len() % 4;
    if remainder != 0 {
        debug!(dropped = remainder, "CVN payload is not a multiple of 4 bytes, truncating");
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|word| format!("{:08X}", bytes_to_int(word)))
        .collect::<Vec<_>>()
        .join(" "))
}

/// Adapter-reported battery voltage such as `"12.6V"`
pub fn elm_voltage(bytes: &[u8]) -> CodecResult<Measurement> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| DecodeError::MalformedText(e.to_string()))?;
    let trimmed = text.trim().trim_end_matches(['V', 'v']);
    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DecodeError::MalformedText(format!("not a voltage: {:?}", text)))?;
    Ok(Measurement::new(value, Unit::Volt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(m: Measurement, expected: f64) -> bool {
        (m.value - expected).abs() < 1e-6
    }

    #[test]
    fn test_percent_bounds() {
        let full = percent(&[0xFF]).unwrap();
        assert!(approx(full, 100.0));
        assert_eq!(full.unit, Unit::Percent);
        assert!(approx(percent(&[0x00]).unwrap(), 0.0));
    }

    #[test]
    fn test_percent_centered() {
        // 0x90 = 144 => (144 - 128) * 100 / 128 = 12.5
        assert!(approx(percent_centered(&[0x90]).unwrap(), 12.5));
        assert!(approx(percent_centered(&[0x00]).unwrap(), -100.0));
    }

    #[test]
    fn test_temperature() {
        // 0x73 = 115 => 75°C
        let t = temperature(&[0x73]).unwrap();
        assert!(approx(t, 75.0));
        assert_eq!(t.unit, Unit::Celsius);
    }

    #[test]
    fn test_pressures() {
        assert!(approx(pressure(&[0x65]).unwrap(), 101.0));
        assert!(approx(fuel_pressure(&[0x64]).unwrap(), 300.0));
    }

    #[test]
    fn test_timing_and_voltage() {
        assert!(approx(timing_advance(&[0x90]).unwrap(), 8.0));
        assert!(approx(sensor_voltage(&[0xC8, 0xFF]).unwrap(), 1.0));
        assert!(approx(sensor_voltage_big(&[0x80, 0x00, 0xFF, 0xFF]).unwrap(), 8.0));
    }

    #[test]
    fn test_current_centered() {
        // 0x8000 / 256 - 128 = 0
        assert!(approx(current_centered(&[0x80, 0x00]).unwrap(), 0.0));
        // Trailing pair of a lambda+current response
        let m = current_centered(&[0x80, 0x00, 0x81, 0x00]).unwrap();
        assert!(approx(m, 1.0));
        assert_eq!(m.unit, Unit::Milliampere);
    }

    #[test]
    fn test_evap_pressure_signed_bytes() {
        // A = -1, B = -4 => (-256 - 4) / 4 = -65
        assert!(approx(evap_pressure(&[0xFF, 0xFC]).unwrap(), -65.0));
        // A = 1, B = 0 => 256 / 4 = 64
        assert!(approx(evap_pressure(&[0x01, 0x00]).unwrap(), 64.0));
        assert_eq!(evap_pressure(&[0x01]).unwrap_err(), DecodeError::PayloadTooShort {
            decoder: "evap pressure",
            expected: 2,
            actual: 1
        });
    }

    #[test]
    fn test_evap_variants() {
        assert!(approx(abs_evap_pressure(&[0x4E, 0x20]).unwrap(), 100.0));
        assert!(approx(evap_pressure_alt(&[0x7F, 0xFF]).unwrap(), 0.0));
    }

    #[test]
    fn test_two_byte_formulas() {
        assert!(approx(inject_timing(&[0x69, 0x00]).unwrap(), 0.0));
        assert!(approx(fuel_rate(&[0x00, 0x64]).unwrap(), 5.0));
        assert!(approx(max_maf(&[0x05]).unwrap(), 50.0));
        assert!(approx(absolute_load(&[0x00, 0xFF]).unwrap(), 100.0));
        assert!(approx(count(&[0x01, 0x00]).unwrap(), 256.0));
    }

    #[test]
    fn test_uas_fixed_id() {
        let speed = uas(0x09, &[0x55]).unwrap();
        assert!(approx(speed, 85.0));
        assert_eq!(speed.unit, Unit::KilometersPerHour);
        assert_eq!(uas(0x00, &[0x55]), Err(DecodeError::UnknownScaleId(0x00)));
    }

    #[test]
    fn test_categorical_tables() {
        assert_eq!(fuel_type(&[0x01]).unwrap(), "Gasoline");
        assert_eq!(obd_compliance(&[0x06]).unwrap(), "EOBD (Europe)");
        assert!(matches!(
            fuel_type(&[FUEL_TYPES.len() as u8]),
            Err(DecodeError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_fuel_status_both_banks() {
        let decoded = fuel_status(&[0b0000_0010, 0b0000_0100], true).unwrap();
        assert_eq!(
            decoded.value,
            format!("Status 1: {}, Status 2: {}", FUEL_STATUS[1], FUEL_STATUS[2])
        );
        assert!(decoded.issues.is_empty());
    }

    #[test]
    fn test_fuel_status_no_bits_fails() {
        assert_eq!(
            fuel_status(&[0x00, 0x00], true).unwrap_err(),
            DecodeError::InvalidBitPattern {
                field: "fuel status 1",
                set_bits: 0
            }
        );
    }

    #[test]
    fn test_fuel_status_partial() {
        let decoded = fuel_status(&[0b0000_0010, 0x00], true).unwrap();
        assert_eq!(decoded.value, format!("Status 1: {}", FUEL_STATUS[1]));
        assert_eq!(decoded.issues.len(), 1);

        // Multiple bits in the first byte, second byte still decodes
        let decoded = fuel_status(&[0b0000_0011, 0b0000_0001], true).unwrap();
        assert_eq!(decoded.value, format!("Status 2: {}", FUEL_STATUS[0]));

        assert!(fuel_status(&[0b0000_0010, 0x00], false).is_err());
    }

    #[test]
    fn test_fuel_status_high_bit_out_of_table() {
        let err = fuel_status(&[0b1000_0000, 0b1000_0000], true).unwrap_err();
        assert!(matches!(err, DecodeError::IndexOutOfRange { index: 7, .. }));
    }

    #[test]
    fn test_air_status() {
        assert_eq!(air_status(&[0b0000_0001]).unwrap(), "Upstream");
        assert_eq!(air_status(&[0b0000_1000]).unwrap(), AIR_STATUS[3]);
        assert!(matches!(
            air_status(&[0b0001_0000]),
            Err(DecodeError::IndexOutOfRange { index: 4, .. })
        ));
        assert!(matches!(
            air_status(&[0b0000_0011]),
            Err(DecodeError::InvalidBitPattern { set_bits: 2, .. })
        ));
    }

    #[test]
    fn test_o2_sensor_banks() {
        assert_eq!(o2_sensors(&[0b0011_0001]).unwrap(), "Bank 1: 0011, Bank 2: 0001");
        assert_eq!(
            o2_sensors_alt(&[0b1101_0010]).unwrap(),
            "Bank 1: 11, Bank 2: 01, Bank 3: 00, Bank 4: 10"
        );
    }

    #[test]
    fn test_bit_flags() {
        assert!(aux_input_status(&[0x80]).unwrap());
        assert!(!aux_input_status(&[0x7F]).unwrap());
        assert_eq!(supported_pids(&[0xBE, 0x1F]).unwrap(), "1011111000011111");
    }

    #[test]
    fn test_encoded_string() {
        let vin = encoded_string(b"\x01\x02WP0ZZZ99ZTS392124").unwrap();
        assert_eq!(vin, "WP0ZZZ99ZTS392124");
        assert!(matches!(
            encoded_string(&[0xFF, 0xFE, 0x41]),
            Err(DecodeError::MalformedText(_))
        ));
    }

    #[test]
    fn test_cvn() {
        assert_eq!(cvn(&[0x17, 0x91, 0xBC, 0x82]).unwrap(), "1791BC82");
        assert_eq!(
            cvn(&[0x17, 0x91, 0xBC, 0x82, 0x00, 0x00, 0x00, 0x01, 0xAA]).unwrap(),
            "1791BC82 00000001"
        );
    }

    #[test]
    fn test_elm_voltage() {
        assert!(approx(elm_voltage(b"12.6V").unwrap(), 12.6));
        assert!(approx(elm_voltage(b" 11.9v\r").unwrap(), 11.9));
        assert!(matches!(elm_voltage(b"NO DATA"), Err(DecodeError::MalformedText(_))));
        let non_finite: [&[u8]; 4] = [b"NaN", b"inf", b"-infinity", b"infV"];
        for text in non_finite {
            assert!(matches!(elm_voltage(text), Err(DecodeError::MalformedText(_))));
        }
    }

    #[test]
    fn test_wide_spans_rejected() {
        let wide = [1, 0, 0, 0, 0, 0, 0, 0, 5];
        for result in [count(&wide), temperature(&wide), absolute_load(&wide), uas(0x01, &wide)] {
            assert!(matches!(
                result,
                Err(DecodeError::PayloadTooLong { max: 8, actual: 9, .. })
            ));
        }
        assert!(approx(count(&[0, 0, 0, 0, 0, 0, 0, 5]).unwrap(), 5.0));
    }

    #[test]
    fn test_empty_payloads_fail() {
        assert!(matches!(percent(&[]), Err(DecodeError::PayloadTooShort { .. })));
        assert!(matches!(fuel_type(&[]), Err(DecodeError::PayloadTooShort { .. })));
    }

    proptest! {
        #[test]
        fn prop_fuel_type_round_trip(index in any::<u8>()) {
            match fuel_type(&[index]) {
                Ok(name) => prop_assert_eq!(name.as_str(), FUEL_TYPES[index as usize]),
                Err(err) => {
                    prop_assert!((index as usize) >= FUEL_TYPES.len());
                    let is_out_of_range = matches!(err, DecodeError::IndexOutOfRange { .. });
                    prop_assert!(is_out_of_range);
                }
            }
        }

        #[test]
        fn prop_compliance_round_trip(index in any::<u8>()) {
            let result = obd_compliance(&[index]);
            if (index as usize) < OBD_COMPLIANCE.len() {
                let name = result.unwrap();
                prop_assert_eq!(name.as_str(), OBD_COMPLIANCE[index as usize]);
            } else {
                prop_assert!(result.is_err());
            }
        }

        #[test]
        fn prop_percent_in_range(byte in any::<u8>()) {
            let m = percent(&[byte]).unwrap();
            prop_assert!(m.value >= 0.0 && m.value <= 100.0 + 1e-9);
        }
    }
}
