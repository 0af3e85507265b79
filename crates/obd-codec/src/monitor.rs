//! On-board monitor test results (Mode 06)
//!
//! The payload is a run of 9-byte records:
//! `[mid, test id, scaling id, value(2), min(2), max(2)]`.

use crate::decoder::Decoded;
use crate::error::{CodecResult, DecodeError};
use crate::scaling::{self, ScaleEntry};
use crate::tables::test_ids;
use crate::unit::Measurement;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Size of one test record in bytes
pub const RECORD_SIZE: usize = 9;

/// A complete test result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorTest {
    pub test_id: u8,
    pub name: String,
    pub description: String,
    pub value: Measurement,
    pub min: f64,
    pub max: f64,
}

impl MonitorTest {
    /// Value lies within `[min, max]`
    pub fn passed(&self) -> bool {
        self.min <= self.value.value && self.value.value <= self.max
    }
}

/// Test results keyed by test id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Monitor {
    tests: BTreeMap<u8, MonitorTest>,
}

impl Monitor {
    /// An empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a test, replacing any earlier result with the same id
    pub fn insert(&mut self, test: MonitorTest) -> Option<MonitorTest> {
        self.tests.insert(test.test_id, test)
    }

    /// Result for `test_id`, if one was decoded
    pub fn get(&self, test_id: u8) -> Option<&MonitorTest> {
        self.tests.get(&test_id)
    }

    /// Number of distinct test ids
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Whether no test decoded
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Tests in ascending test id order
    pub fn iter(&self) -> impl Iterator<Item = &MonitorTest> {
        self.tests.values()
    }
}

/// Outcome of parsing one record
#[derive(Debug, Clone, PartialEq)]
enum RecordState {
    Complete(MonitorTest),
    Incomplete { test_id: u8, reason: DecodeError },
}

fn parse_record(record: &[u8; RECORD_SIZE], issues: &mut Vec<DecodeError>) -> RecordState {
    let test_id = record[1];
    let scale_id = record[2];

    let entry: ScaleEntry = match scaling::lookup(scale_id) {
        Some(entry) => entry,
        None => {
            warn!(test_id, scale_id, "Skipping monitor record with unknown scaling id");
            return RecordState::Incomplete {
                test_id,
                reason: DecodeError::UnknownScaleId(scale_id),
            };
        }
    };

    let (name, description) = match test_ids::lookup(test_id) {
        Ok(info) => (info.name.to_string(), info.description.to_string()),
        Err(err) => {
            debug!(test_id, scale_id, "Unknown monitor test id");
            issues.push(err);
            (
                format!("Unknown test 0x{:02X}", test_id),
                format!(
                    "Unrecognized test id 0x{:02X} with scaling id 0x{:02X}",
                    test_id, scale_id
                ),
            )
        }
    };

    RecordState::Complete(MonitorTest {
        test_id,
        name,
        description,
        value: entry.apply(&record[3..5]),
        min: entry.apply(&record[5..7]).value,
        max: entry.apply(&record[7..9]).value,
    })
}

/// Decode a run of monitor records.
///
/// A trailing partial record is dropped and reported, or rejected when
/// `strict` is set. Records with an unknown scaling id are skipped.
/// Later records overwrite earlier ones with the same test id.
pub fn decode_monitor(bytes: &[u8], strict: bool) -> CodecResult<Decoded<Monitor>> {
    let mut issues = Vec::new();

    let remainder = bytes.len() % RECORD_SIZE;
    if remainder != 0 {
        let err = DecodeError::TruncatedRecordBlock {
            dropped: remainder,
            record_size: RECORD_SIZE,
        };
        if strict {
            return Err(err);
        }
        warn!(
            "Monitor payload of {} bytes is not a multiple of {}, truncating",
            bytes.len(),
            RECORD_SIZE
        );
        issues.push(err);
    }

    let mut monitor = Monitor::new();
    for chunk in bytes.chunks_exact(RECORD_SIZE) {
        let Ok(record) = <&[u8; RECORD_SIZE]>::try_from(chunk) else {
            continue;
        };
        match parse_record(record, &mut issues) {
            RecordState::Complete(test) => {
                if monitor.insert(test).is_some() {
                    debug!(test_id = record[1], "Duplicate monitor test id, keeping latest");
                }
            }
            RecordState::Incomplete { test_id, reason } => {
                debug!(test_id, "Monitor record not decoded: {}", reason);
                issues.push(reason);
            }
        }
    }

    Ok(Decoded::with_issues(monitor, issues))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    fn record(test_id: u8, scale_id: u8, value: u16, min: u16, max: u16) -> Vec<u8> {
        let mut r = vec![0x01, test_id, scale_id];
        r.extend_from_slice(&value.to_be_bytes());
        r.extend_from_slice(&min.to_be_bytes());
        r.extend_from_slice(&max.to_be_bytes());
        r
    }

    #[test]
    fn test_single_record() {
        // 0x0B = 0.001 V per count
        let payload = record(0x01, 0x0B, 450, 400, 500);
        let decoded = decode_monitor(&payload, false).unwrap();
        let test = decoded.value.get(0x01).unwrap();
        assert_eq!(test.name, "RTL_THRESHOLD_VOLTAGE");
        assert!((test.value.value - 0.45).abs() < 1e-9);
        assert_eq!(test.value.unit, Unit::Volt);
        assert!((test.min - 0.4).abs() < 1e-9);
        assert!((test.max - 0.5).abs() < 1e-9);
        assert!(test.passed());
        assert!(decoded.issues.is_empty());
    }

    #[test]
    fn test_failed_range() {
        let payload = record(0x0B, 0x24, 30, 0, 20);
        let decoded = decode_monitor(&payload, false).unwrap();
        assert!(!decoded.value.get(0x0B).unwrap().passed());
    }

    #[test]
    fn test_unknown_scale_skips_record() {
        let mut payload = record(0x01, 0x0B, 450, 400, 500);
        payload.extend(record(0x02, 0x00, 1, 2, 3));
        assert_eq!(payload.len(), 18);
        let decoded = decode_monitor(&payload, false).unwrap();
        assert_eq!(decoded.value.len(), 1);
        assert!(decoded.value.get(0x01).is_some());
        assert_eq!(decoded.issues, vec![DecodeError::UnknownScaleId(0x00)]);
    }

    #[test]
    fn test_trailing_bytes_dropped() {
        let mut payload = record(0x01, 0x0B, 1, 0, 2);
        payload.extend(record(0x02, 0x0B, 1, 0, 2));
        payload.extend([0xAA, 0xBB]);
        assert_eq!(payload.len(), 20);
        let decoded = decode_monitor(&payload, false).unwrap();
        assert_eq!(decoded.value.len(), 2);
        assert_eq!(
            decoded.issues,
            vec![DecodeError::TruncatedRecordBlock {
                dropped: 2,
                record_size: RECORD_SIZE
            }]
        );
    }

    #[test]
    fn test_strict_rejects_truncation() {
        let mut payload = record(0x01, 0x0B, 1, 0, 2);
        payload.push(0x00);
        assert!(matches!(
            decode_monitor(&payload, true),
            Err(DecodeError::TruncatedRecordBlock { dropped: 1, .. })
        ));
    }

    #[test]
    fn test_unknown_test_id_synthesized() {
        let payload = record(0x91, 0x0B, 1, 0, 2);
        let decoded = decode_monitor(&payload, false).unwrap();
        let test = decoded.value.get(0x91).unwrap();
        assert_eq!(test.name, "Unknown test 0x91");
        assert!(test.description.contains("0x0B"));
        assert_eq!(decoded.issues, vec![DecodeError::UnknownTestId(0x91)]);
    }

    #[test]
    fn test_skipped_record_reports_only_scale_id() {
        let payload = record(0x91, 0x00, 1, 0, 2);
        let decoded = decode_monitor(&payload, false).unwrap();
        assert!(decoded.value.is_empty());
        assert_eq!(decoded.issues, vec![DecodeError::UnknownScaleId(0x00)]);
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let mut payload = record(0x05, 0x10, 100, 0, 200);
        payload.extend(record(0x05, 0x10, 300, 0, 200));
        let decoded = decode_monitor(&payload, false).unwrap();
        assert_eq!(decoded.value.len(), 1);
        let test = decoded.value.get(0x05).unwrap();
        assert_eq!(test.value.value, 300.0);
        assert!(!test.passed());
    }

    #[test]
    fn test_signed_scaling() {
        // 0x96 = signed 0.1°C; 0xFF9C = -100 => -10.0
        let payload = record(0x0A, 0x96, 0xFF9C, 0xFF00, 0x0100);
        let decoded = decode_monitor(&payload, false).unwrap();
        let test = decoded.value.get(0x0A).unwrap();
        assert!((test.value.value - -10.0).abs() < 1e-9);
        assert!((test.min - -25.6).abs() < 1e-9);
        assert!(test.passed());
    }

    #[test]
    fn test_empty_payload() {
        let decoded = decode_monitor(&[], false).unwrap();
        assert!(decoded.value.is_empty());
        assert!(decoded.issues.is_empty());
    }
}
