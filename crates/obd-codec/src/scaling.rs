//! Units and Scaling Registry
//!
//! Maps the one-byte units-and-scaling id used by on-board monitor tests to
//! the formula that turns a big-endian byte span into a physical value.
//! Ids 0x01-0x7F are unsigned, ids 0x80 and up are two's-complement signed.

use crate::error::{require_at_most, CodecResult, DecodeError};
use crate::unit::{Measurement, Unit};
use serde::Serialize;

/// Decode formula for one scaling id
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleEntry {
    /// Interpret the raw integer as two's complement over the span width
    pub signed: bool,
    pub scale: f64,
    pub unit: Unit,
    pub offset: f64,
}

impl ScaleEntry {
    const fn unsigned(scale: f64, unit: Unit) -> Self {
        Self {
            signed: false,
            scale,
            unit,
            offset: 0.0,
        }
    }

    const fn signed(scale: f64, unit: Unit) -> Self {
        Self {
            signed: true,
            scale,
            unit,
            offset: 0.0,
        }
    }

    const fn with_offset(self, offset: f64) -> Self {
        Self { offset, ..self }
    }

    /// Apply `value * scale + offset` to a big-endian byte span
    pub fn apply(&self, bytes: &[u8]) -> Measurement {
        let raw = bytes_to_int(bytes);
        let value = if self.signed {
            twos_complement(raw as i64, (bytes.len() * 8) as u32) as f64
        } else {
            raw as f64
        };
        Measurement::new(value * self.scale + self.offset, self.unit)
    }
}

/// Widest span [`bytes_to_int`] folds without losing bytes
pub const MAX_INT_BYTES: usize = 8;

/// Fold a byte span into an unsigned integer, first byte most significant.
///
/// Only the last [`MAX_INT_BYTES`] bytes survive; callers decoding an
/// arbitrary span check its width first.
pub fn bytes_to_int(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// Reinterpret the low `bit_length` bits of `value` as a two's-complement integer.
///
/// The value is masked to `bit_length` bits first, so applying this twice
/// gives the same result as applying it once.
pub fn twos_complement(value: i64, bit_length: u32) -> i64 {
    if bit_length == 0 || bit_length >= 64 {
        return value;
    }
    let mask = u64::MAX >> (64 - bit_length);
    let masked = value as u64 & mask;
    if masked & (1u64 << (bit_length - 1)) != 0 {
        (masked | !mask) as i64
    } else {
        masked as i64
    }
}

/// Look up the registry entry for a scaling id
pub fn lookup(id: u8) -> Option<ScaleEntry> {
    use Unit::*;
    let entry = match id {
        // Unsigned
        0x01 => ScaleEntry::unsigned(1.0, Count),
        0x02 => ScaleEntry::unsigned(0.1, Count),
        0x03 => ScaleEntry::unsigned(0.01, Count),
        0x04 => ScaleEntry::unsigned(0.001, Count),
        0x05 => ScaleEntry::unsigned(0.0000305, Count),
        0x06 => ScaleEntry::unsigned(0.000305, Count),
        0x07 => ScaleEntry::unsigned(0.25, Rpm),
        0x08 => ScaleEntry::unsigned(0.01, KilometersPerHour),
        0x09 => ScaleEntry::unsigned(1.0, KilometersPerHour),
        0x0A => ScaleEntry::unsigned(0.122, Millivolt),
        0x0B => ScaleEntry::unsigned(0.001, Volt),
        0x0C => ScaleEntry::unsigned(0.01, Volt),
        0x0D => ScaleEntry::unsigned(0.00390625, Milliampere),
        0x0E => ScaleEntry::unsigned(0.001, Ampere),
        0x0F => ScaleEntry::unsigned(0.01, Ampere),
        0x10 => ScaleEntry::unsigned(1.0, Millisecond),
        0x11 => ScaleEntry::unsigned(100.0, Millisecond),
        0x12 => ScaleEntry::unsigned(1.0, Second),
        0x13 => ScaleEntry::unsigned(1.0, Milliohm),
        0x14 => ScaleEntry::unsigned(1.0, Ohm),
        0x15 => ScaleEntry::unsigned(1.0, Kiloohm),
        0x16 => ScaleEntry::unsigned(0.1, Celsius).with_offset(-40.0),
        0x17 => ScaleEntry::unsigned(0.01, Kilopascal),
        0x18 => ScaleEntry::unsigned(0.0117, Kilopascal),
        0x19 => ScaleEntry::unsigned(0.079, Kilopascal),
        0x1A => ScaleEntry::unsigned(1.0, Kilopascal),
        0x1B => ScaleEntry::unsigned(10.0, Kilopascal),
        0x1C => ScaleEntry::unsigned(0.01, Degree),
        0x1D => ScaleEntry::unsigned(0.5, Degree),
        0x1E => ScaleEntry::unsigned(0.0000305, Ratio),
        0x1F => ScaleEntry::unsigned(0.05, Ratio),
        0x20 => ScaleEntry::unsigned(0.00390625, Ratio),
        0x21 => ScaleEntry::unsigned(1.0, Millihertz),
        0x22 => ScaleEntry::unsigned(1.0, Hertz),
        0x23 => ScaleEntry::unsigned(1.0, Kilohertz),
        0x24 => ScaleEntry::unsigned(1.0, Count),
        0x25 => ScaleEntry::unsigned(1.0, Kilometer),
        0x26 => ScaleEntry::unsigned(0.1, MillivoltPerMillisecond),
        0x27 => ScaleEntry::unsigned(0.01, GramsPerSecond),
        0x28 => ScaleEntry::unsigned(1.0, GramsPerSecond),
        0x29 => ScaleEntry::unsigned(0.25, PascalPerSecond),
        0x2A => ScaleEntry::unsigned(0.001, KilogramsPerHour),
        0x2B => ScaleEntry::unsigned(1.0, Count),
        0x2C => ScaleEntry::unsigned(0.01, Gram),
        0x2D => ScaleEntry::unsigned(0.01, Milligram),
        0x2E => ScaleEntry::unsigned(1.0, Boolean),
        0x2F => ScaleEntry::unsigned(0.01, Percent),
        0x30 => ScaleEntry::unsigned(0.001526, Percent),
        0x31 => ScaleEntry::unsigned(0.001, Liter),
        0x32 => ScaleEntry::unsigned(0.0000305, Inch),
        0x33 => ScaleEntry::unsigned(0.00024414, Ratio),
        0x34 => ScaleEntry::unsigned(1.0, Minute),
        0x35 => ScaleEntry::unsigned(10.0, Millisecond),
        0x36 => ScaleEntry::unsigned(0.01, Gram),
        0x37 => ScaleEntry::unsigned(0.1, Gram),
        0x38 => ScaleEntry::unsigned(1.0, Gram),
        0x39 => ScaleEntry::unsigned(0.01, Percent).with_offset(-327.68),
        0x3A => ScaleEntry::unsigned(0.001, Gram),
        0x3B => ScaleEntry::unsigned(0.0001, Gram),
        0x3C => ScaleEntry::unsigned(0.1, Microsecond),
        0x3D => ScaleEntry::unsigned(0.01, Milliampere),
        0x3E => ScaleEntry::unsigned(0.00006103516, SquareMillimeter),
        0x3F => ScaleEntry::unsigned(0.01, Liter),
        0x40 => ScaleEntry::unsigned(1.0, PartsPerMillion),
        0x41 => ScaleEntry::unsigned(0.01, Microampere),

        // Signed
        0x81 => ScaleEntry::signed(1.0, Count),
        0x82 => ScaleEntry::signed(0.1, Count),
        0x83 => ScaleEntry::signed(0.01, Count),
        0x84 => ScaleEntry::signed(0.001, Count),
        0x85 => ScaleEntry::signed(0.0000305, Count),
        0x86 => ScaleEntry::signed(0.000305, Count),
        0x87 => ScaleEntry::signed(1.0, PartsPerMillion),
        0x8A => ScaleEntry::signed(0.122, Millivolt),
        0x8B => ScaleEntry::signed(0.001, Volt),
        0x8C => ScaleEntry::signed(0.01, Volt),
        0x8D => ScaleEntry::signed(0.00390625, Milliampere),
        0x8E => ScaleEntry::signed(0.001, Ampere),
        0x90 => ScaleEntry::signed(1.0, Millisecond),
        0x96 => ScaleEntry::signed(0.1, Celsius),
        0x99 => ScaleEntry::signed(0.1, Kilopascal),
        0x9C => ScaleEntry::signed(0.01, Degree),
        0x9D => ScaleEntry::signed(0.5, Degree),
        0xA8 => ScaleEntry::signed(1.0, GramsPerSecond),
        0xA9 => ScaleEntry::signed(0.25, PascalPerSecond),
        0xAD => ScaleEntry::signed(0.01, Milligram),
        0xAE => ScaleEntry::signed(0.1, Milligram),
        0xAF => ScaleEntry::signed(0.01, Percent),
        0xB0 => ScaleEntry::signed(0.003052, Percent),
        0xB1 => ScaleEntry::signed(2.0, MillivoltPerSecond),
        0xFC => ScaleEntry::signed(0.01, Kilopascal),
        0xFD => ScaleEntry::signed(0.001, Kilopascal),
        0xFE => ScaleEntry::signed(0.25, Pascal),
        _ => return None,
    };
    Some(entry)
}

/// Decode `bytes` with the formula registered for `id`
pub fn decode(id: u8, bytes: &[u8]) -> CodecResult<Measurement> {
    let entry = lookup(id).ok_or(DecodeError::UnknownScaleId(id))?;
    require_at_most("scaled value", bytes, MAX_INT_BYTES)?;
    Ok(entry.apply(bytes))
}
