//! Diagnostic Trouble Code decoding
//!
//! Each code is two bytes. The top two bits select the system letter, the
//! next two the first digit, and the rest render as three hex digits.

use crate::error::{require, CodecResult, DecodeError};
use crate::tables::codes;
use serde::{Deserialize, Serialize};
use std::fmt;

const CATEGORIES: [char; 4] = ['P', 'C', 'B', 'U'];

/// A decoded trouble code such as `P0301`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TroubleCode {
    pub code: String,
    pub description: String,
}

impl fmt::Display for TroubleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.description)
    }
}

/// Decode one byte pair. An all-zero pair is [`DecodeError::NoCode`].
pub fn decode_pair(first: u8, second: u8, missing_description: &str) -> CodecResult<TroubleCode> {
    if first == 0 && second == 0 {
        return Err(DecodeError::NoCode);
    }

    let category = CATEGORIES[(first >> 6) as usize];
    let digit = (first >> 4) & 0b11;
    let rest = (((first & 0x3F) as u16) << 8) | second as u16;
    let code = format!("{}{}{:03X}", category, digit, rest & 0x0FFF);

    let description = codes::describe(&code)
        .unwrap_or(missing_description)
        .to_string();
    Ok(TroubleCode { code, description })
}

/// Decode consecutive byte pairs, skipping empty ones.
///
/// An odd trailing byte is paired with itself.
pub fn decode_dtcs(bytes: &[u8], missing_description: &str) -> Vec<TroubleCode> {
    let Some(&last) = bytes.last() else {
        return Vec::new();
    };
    (0..bytes.len())
        .step_by(2)
        .filter_map(|i| {
            let second = bytes.get(i + 1).copied().unwrap_or(last);
            decode_pair(bytes[i], second, missing_description).ok()
        })
        .collect()
}

/// Decode exactly one code from the first two bytes
pub fn decode_single_dtc(bytes: &[u8], missing_description: &str) -> CodecResult<Vec<TroubleCode>> {
    require("single dtc", bytes, 2)?;
    match decode_pair(bytes[0], bytes[1], missing_description) {
        Ok(code) => Ok(vec![code]),
        Err(DecodeError::NoCode) => Ok(Vec::new()),
        Err(err) => Err(err),
    }
}
