//! Monitor status decoding (PID 0x01)
//!
//! After the leading byte, the payload is a 32-bit field:
//!
//! | bits  | meaning                                        |
//! |-------|------------------------------------------------|
//! | 0     | malfunction indicator lamp                     |
//! | 1-7   | trouble code count                             |
//! | 9-11  | base test not-ready flags                      |
//! | 12    | ignition type (0 spark, 1 compression)         |
//! | 13-15 | base test supported flags                      |
//! | 16-23 | engine test supported flags                    |
//! | 24-31 | engine test not-ready flags                    |

use crate::bits::BitView;
use crate::error::{require, CodecResult};
use serde::{Deserialize, Serialize};
use std::fmt;

const SUPPORTED_BASE: usize = 13;
const NOT_READY_BASE: usize = 9;
const SUPPORTED_ENGINE: usize = 16;
const NOT_READY_ENGINE: usize = 24;

/// Skipped byte plus the base 16 bits
const MIN_PAYLOAD: usize = 3;
/// Skipped byte plus the full 32 bits
const FULL_PAYLOAD: usize = 5;

/// Engine tests in bit order; `None` marks a reserved slot
const SPARK_TESTS: [Option<&str>; 8] = [
    Some("EGR/VVT System Monitoring"),
    Some("Oxygen Sensor Heater Monitoring"),
    Some("Oxygen Sensor Monitoring"),
    None,
    Some("Secondary Air System Monitoring"),
    Some("Evaporative System Monitoring"),
    Some("Heated Catalyst Monitoring"),
    Some("Catalyst Monitoring"),
];

const COMPRESSION_TESTS: [Option<&str>; 8] = [
    Some("EGR/VVT System Monitoring"),
    Some("PM Filter Monitoring"),
    Some("Exhaust Gas Sensor Monitoring"),
    None,
    Some("Boost Pressure Monitoring"),
    None,
    Some("NOx/SCR Aftertreatment Monitoring"),
    Some("NMHC Catalyst Monitoring"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnitionType {
    Spark,
    Compression,
}

impl fmt::Display for IgnitionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnitionType::Spark => f.write_str("Spark"),
            IgnitionType::Compression => f.write_str("Compression"),
        }
    }
}

/// One readiness monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTest {
    pub name: String,
    pub supported: bool,
    /// The monitor has completed
    pub ready: bool,
}

impl StatusTest {
    fn from_bits(name: &str, bits: &BitView<'_>, supported_bit: usize, not_ready_bit: usize) -> Self {
        Self {
            name: name.to_string(),
            supported: bits.bit(supported_bit),
            ready: !bits.bit(not_ready_bit),
        }
    }
}

/// Decoded monitor status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub malfunction_indicator_on: bool,
    pub trouble_code_count: u8,
    pub ignition_type: IgnitionType,
    pub misfire_monitoring: StatusTest,
    pub fuel_system_monitoring: StatusTest,
    pub component_monitoring: StatusTest,
    /// Ignition-specific tests, empty when the payload stops after the base field
    pub engine_tests: Vec<StatusTest>,
}

/// Decode a monitor status payload. The first byte is skipped.
pub fn decode_status(bytes: &[u8]) -> CodecResult<Status> {
    require("status", bytes, MIN_PAYLOAD)?;
    let field = &bytes[1..bytes.len().min(FULL_PAYLOAD)];
    let bits = BitView::new(field);

    let ignition_type = if bits.bit(12) {
        IgnitionType::Compression
    } else {
        IgnitionType::Spark
    };

    let base = |i: usize, name: &str| {
        StatusTest::from_bits(name, &bits, SUPPORTED_BASE + i, NOT_READY_BASE + i)
    };

    let engine_tests = if bits.len() >= 32 {
        let names = match ignition_type {
            IgnitionType::Spark => &SPARK_TESTS,
            IgnitionType::Compression => &COMPRESSION_TESTS,
        };
        names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| {
                let name = (*name)?;
                Some(StatusTest::from_bits(
                    name,
                    &bits,
                    SUPPORTED_ENGINE + i,
                    NOT_READY_ENGINE + i,
                ))
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Status {
        malfunction_indicator_on: bits.bit(0),
        trouble_code_count: bits.value_at(1..=7) as u8,
        ignition_type,
        component_monitoring: base(0, "Component Monitoring"),
        fuel_system_monitoring: base(1, "Fuel System Monitoring"),
        misfire_monitoring: base(2, "Misfire Monitoring"),
        engine_tests,
    })
}
