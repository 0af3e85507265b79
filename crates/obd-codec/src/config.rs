//! Decoder configuration

use serde::{Deserialize, Serialize};

/// Default text for trouble codes missing from the description table
pub const NO_DESCRIPTION: &str = "No description available.";

/// Decoder configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Reject monitor payloads whose length is not a whole number of records
    pub strict_record_blocks: bool,

    /// Accept a fuel status where only one of the two bytes decodes
    pub allow_partial_fuel_status: bool,

    /// Description used for trouble codes missing from the table
    pub missing_dtc_description: String,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            strict_record_blocks: false,
            allow_partial_fuel_status: true,
            missing_dtc_description: NO_DESCRIPTION.to_string(),
        }
    }
}

impl DecodeConfig {
    /// Fail instead of tolerating truncated or partial payloads
    pub fn strict() -> Self {
        Self {
            strict_record_blocks: true,
            allow_partial_fuel_status: false,
            ..Default::default()
        }
    }

    /// Tolerate everything the decoders can recover from
    pub fn lenient() -> Self {
        Self::default()
    }
}
