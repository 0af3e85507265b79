//! On-board monitor test ids (Mode 06)

use crate::error::{CodecResult, DecodeError};

/// Name and description of a standardized test id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestIdInfo {
    pub name: &'static str,
    pub description: &'static str,
}

const fn info(name: &'static str, description: &'static str) -> TestIdInfo {
    TestIdInfo { name, description }
}

/// Look up a test id. 0x00 is reserved and never known.
pub fn lookup(test_id: u8) -> CodecResult<TestIdInfo> {
    let found = match test_id {
        0x01 => info("RTL_THRESHOLD_VOLTAGE", "Rich to lean sensor threshold voltage"),
        0x02 => info("LTR_THRESHOLD_VOLTAGE", "Lean to rich sensor threshold voltage"),
        0x03 => info(
            "LOW_VOLTAGE_SWITCH_TIME",
            "Low sensor voltage for switch time calculation",
        ),
        0x04 => info(
            "HIGH_VOLTAGE_SWITCH_TIME",
            "High sensor voltage for switch time calculation",
        ),
        0x05 => info("RTL_SWITCH_TIME", "Rich to lean sensor switch time"),
        0x06 => info("LTR_SWITCH_TIME", "Lean to rich sensor switch time"),
        0x07 => info("MIN_VOLTAGE", "Minimum sensor voltage for test cycle"),
        0x08 => info("MAX_VOLTAGE", "Maximum sensor voltage for test cycle"),
        0x09 => info("TRANSITION_TIME", "Time between sensor transitions"),
        0x0A => info("SENSOR_PERIOD", "Sensor period"),
        0x0B => info(
            "MISFIRE_AVERAGE",
            "Average misfire counts for last ten driving cycles",
        ),
        0x0C => info("MISFIRE_COUNT", "Misfire counts for last/current driving cycles"),
        _ => return Err(DecodeError::UnknownTestId(test_id)),
    };
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_ids() {
        assert_eq!(lookup(0x01).unwrap().name, "RTL_THRESHOLD_VOLTAGE");
        assert_eq!(lookup(0x0C).unwrap().name, "MISFIRE_COUNT");
    }

    #[test]
    fn test_reserved_and_unknown() {
        assert_eq!(lookup(0x00), Err(DecodeError::UnknownTestId(0x00)));
        assert_eq!(lookup(0x85), Err(DecodeError::UnknownTestId(0x85)));
    }
}
