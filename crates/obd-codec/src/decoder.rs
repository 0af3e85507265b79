//! Decoder selection and dispatch

use crate::config::DecodeConfig;
use crate::dtc::{self, TroubleCode};
use crate::error::{CodecResult, DecodeError};
use crate::monitor::{self, Monitor};
use crate::primitives;
use crate::status::{self, Status};
use crate::unit::Measurement;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which encoding a payload uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decoder {
    /// Supported-PID bitmap
    Pid,
    Status,
    SingleDtc,
    FuelStatus,
    Percent,
    Temperature,
    PercentCentered,
    FuelPressure,
    Pressure,
    TimingAdvance,
    AirStatus,
    O2Sensors,
    O2SensorsAlt,
    SensorVoltage,
    SensorVoltageBig,
    ObdCompliance,
    AuxInputStatus,
    /// Fixed units-and-scaling id
    Uas(u8),
    CurrentCentered,
    AbsoluteLoad,
    MaxMaf,
    FuelType,
    AbsEvapPressure,
    EvapPressure,
    EvapPressureAlt,
    InjectTiming,
    FuelRate,
    Dtc,
    Monitor,
    Count,
    Cvn,
    EncodedString,
    ElmVoltage,
    /// Payload is ignored
    None,
}

/// A decoded payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DecodeResult {
    Measurement(Measurement),
    Text(String),
    Flag(bool),
    TroubleCodes(Vec<TroubleCode>),
    Status(Status),
    Monitor(Monitor),
    None,
}

/// A value together with the non-fatal problems found while decoding it
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub issues: Vec<DecodeError>,
}

impl<T> Decoded<T> {
    /// A value with no issues
    pub fn new(value: T) -> Self {
        Self {
            value,
            issues: Vec::new(),
        }
    }

    /// A value with the issues found while decoding it
    pub fn with_issues(value: T, issues: Vec<DecodeError>) -> Self {
        Self { value, issues }
    }

    /// Transform the value, keeping the issues
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Decoded<U> {
        Decoded {
            value: f(self.value),
            issues: self.issues,
        }
    }
}

impl<T> From<T> for Decoded<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

/// Stateless OBD-II payload decoder
#[derive(Debug, Clone, Default)]
pub struct ObdDecoder {
    config: DecodeConfig,
}

impl ObdDecoder {
    /// Create a new decoder with given config
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    /// Get the decoder configuration
    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    /// Decode a payload, discarding non-fatal issues
    pub fn decode(&self, decoder: Decoder, bytes: &[u8]) -> CodecResult<DecodeResult> {
        self.decode_report(decoder, bytes).map(|decoded| decoded.value)
    }

    /// Decode a payload and report non-fatal issues next to the value
    pub fn decode_report(&self, decoder: Decoder, bytes: &[u8]) -> CodecResult<Decoded<DecodeResult>> {
        use DecodeResult as R;

        let missing = self.config.missing_dtc_description.as_str();
        let decoded: Decoded<DecodeResult> = match decoder {
            Decoder::Pid => R::Text(primitives::supported_pids(bytes)?).into(),
            Decoder::Status => R::Status(status::decode_status(bytes)?).into(),
            Decoder::SingleDtc => R::TroubleCodes(dtc::decode_single_dtc(bytes, missing)?).into(),
            Decoder::FuelStatus => {
                primitives::fuel_status(bytes, self.config.allow_partial_fuel_status)?.map(R::Text)
            }
            Decoder::Percent => R::Measurement(primitives::percent(bytes)?).into(),
            Decoder::Temperature => R::Measurement(primitives::temperature(bytes)?).into(),
            Decoder::PercentCentered => R::Measurement(primitives::percent_centered(bytes)?).into(),
            Decoder::FuelPressure => R::Measurement(primitives::fuel_pressure(bytes)?).into(),
            Decoder::Pressure => R::Measurement(primitives::pressure(bytes)?).into(),
            Decoder::TimingAdvance => R::Measurement(primitives::timing_advance(bytes)?).into(),
            Decoder::AirStatus => R::Text(primitives::air_status(bytes)?).into(),
            Decoder::O2Sensors => R::Text(primitives::o2_sensors(bytes)?).into(),
            Decoder::O2SensorsAlt => R::Text(primitives::o2_sensors_alt(bytes)?).into(),
            Decoder::SensorVoltage => R::Measurement(primitives::sensor_voltage(bytes)?).into(),
            Decoder::SensorVoltageBig => R::Measurement(primitives::sensor_voltage_big(bytes)?).into(),
            Decoder::ObdCompliance => R::Text(primitives::obd_compliance(bytes)?).into(),
            Decoder::AuxInputStatus => R::Flag(primitives::aux_input_status(bytes)?).into(),
            Decoder::Uas(id) => R::Measurement(primitives::uas(id, bytes)?).into(),
            Decoder::CurrentCentered => R::Measurement(primitives::current_centered(bytes)?).into(),
            Decoder::AbsoluteLoad => R::Measurement(primitives::absolute_load(bytes)?).into(),
            Decoder::MaxMaf => R::Measurement(primitives::max_maf(bytes)?).into(),
            Decoder::FuelType => R::Text(primitives::fuel_type(bytes)?).into(),
            Decoder::AbsEvapPressure => R::Measurement(primitives::abs_evap_pressure(bytes)?).into(),
            Decoder::EvapPressure => R::Measurement(primitives::evap_pressure(bytes)?).into(),
            Decoder::EvapPressureAlt => R::Measurement(primitives::evap_pressure_alt(bytes)?).into(),
            Decoder::InjectTiming => R::Measurement(primitives::inject_timing(bytes)?).into(),
            Decoder::FuelRate => R::Measurement(primitives::fuel_rate(bytes)?).into(),
            Decoder::Dtc => R::TroubleCodes(dtc::decode_dtcs(bytes, missing)).into(),
            Decoder::Monitor => {
                monitor::decode_monitor(bytes, self.config.strict_record_blocks)?.map(R::Monitor)
            }
            Decoder::Count => R::Measurement(primitives::count(bytes)?).into(),
            Decoder::Cvn => R::Text(primitives::cvn(bytes)?).into(),
            Decoder::EncodedString => R::Text(primitives::encoded_string(bytes)?).into(),
            Decoder::ElmVoltage => R::Measurement(primitives::elm_voltage(bytes)?).into(),
            Decoder::None => R::None.into(),
        };

        if !decoded.issues.is_empty() {
            debug!(?decoder, issues = decoded.issues.len(), "Decoded with issues");
        }
        Ok(decoded)
    }
}

/// Decode a payload with the default configuration
pub fn decode(decoder: Decoder, bytes: &[u8]) -> CodecResult<DecodeResult> {
    ObdDecoder::default().decode(decoder, bytes)
}

/// Decode a payload with the default configuration, keeping non-fatal issues
pub fn decode_report(decoder: Decoder, bytes: &[u8]) -> CodecResult<Decoded<DecodeResult>> {
    ObdDecoder::default().decode_report(decoder, bytes)
}
