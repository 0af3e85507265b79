//! Physical units and scaled measurements

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit attached to a decoded measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    Count,
    Rpm,
    KilometersPerHour,
    Millivolt,
    Volt,
    Microampere,
    Milliampere,
    Ampere,
    Microsecond,
    Millisecond,
    Second,
    Minute,
    Milliohm,
    Ohm,
    Kiloohm,
    Celsius,
    Pascal,
    Kilopascal,
    Degree,
    Ratio,
    Millihertz,
    Hertz,
    Kilohertz,
    Kilometer,
    MillivoltPerMillisecond,
    MillivoltPerSecond,
    GramsPerSecond,
    PascalPerSecond,
    KilogramsPerHour,
    LitersPerHour,
    Milligram,
    Gram,
    Boolean,
    Percent,
    Liter,
    Inch,
    SquareMillimeter,
    PartsPerMillion,
}

impl Unit {
    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Count => "count",
            Unit::Rpm => "rpm",
            Unit::KilometersPerHour => "km/h",
            Unit::Millivolt => "mV",
            Unit::Volt => "V",
            Unit::Microampere => "µA",
            Unit::Milliampere => "mA",
            Unit::Ampere => "A",
            Unit::Microsecond => "µs",
            Unit::Millisecond => "ms",
            Unit::Second => "s",
            Unit::Minute => "min",
            Unit::Milliohm => "mΩ",
            Unit::Ohm => "Ω",
            Unit::Kiloohm => "kΩ",
            Unit::Celsius => "°C",
            Unit::Pascal => "Pa",
            Unit::Kilopascal => "kPa",
            Unit::Degree => "°",
            Unit::Ratio => "ratio",
            Unit::Millihertz => "mHz",
            Unit::Hertz => "Hz",
            Unit::Kilohertz => "kHz",
            Unit::Kilometer => "km",
            Unit::MillivoltPerMillisecond => "mV/ms",
            Unit::MillivoltPerSecond => "mV/s",
            Unit::GramsPerSecond => "g/s",
            Unit::PascalPerSecond => "Pa/s",
            Unit::KilogramsPerHour => "kg/h",
            Unit::LitersPerHour => "L/h",
            Unit::Milligram => "mg",
            Unit::Gram => "g",
            Unit::Boolean => "bool",
            Unit::Percent => "%",
            Unit::Liter => "L",
            Unit::Inch => "in",
            Unit::SquareMillimeter => "mm²",
            Unit::PartsPerMillion => "ppm",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A scaled value with its unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: f64,
    pub unit: Unit,
}

impl Measurement {
    /// Create a measurement from a scaled value and its unit
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}
