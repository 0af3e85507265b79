//! OBD-II PID Catalog
//!
//! Maps the standard Mode 01 Parameter IDs to the decoder for their
//! response payload.

use crate::decoder::{decode, DecodeResult, Decoder};
use crate::error::CodecResult;
use serde::{Deserialize, Serialize};

/// Standard OBD-II PIDs for Mode 01 (current data)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Pid {
    /// Supported PIDs 0x01-0x20 (0x00)
    SupportedPids = 0x00,
    /// Monitor status since DTCs cleared (0x01)
    MonitorStatus = 0x01,
    /// DTC that caused the freeze frame (0x02)
    FreezeDtc = 0x02,
    /// Fuel system status (0x03)
    FuelStatus = 0x03,
    /// Calculated engine load (0x04)
    EngineLoad = 0x04,
    /// Engine coolant temperature (0x05)
    CoolantTemp = 0x05,
    /// Short-term fuel trim bank 1 (0x06)
    ShortFuelTrim1 = 0x06,
    /// Long-term fuel trim bank 1 (0x07)
    LongFuelTrim1 = 0x07,
    /// Short-term fuel trim bank 2 (0x08)
    ShortFuelTrim2 = 0x08,
    /// Long-term fuel trim bank 2 (0x09)
    LongFuelTrim2 = 0x09,
    /// Fuel pressure, gauge (0x0A)
    FuelPressure = 0x0A,
    /// Intake manifold absolute pressure (0x0B)
    IntakeManifoldPressure = 0x0B,
    /// Engine RPM (0x0C)
    Rpm = 0x0C,
    /// Vehicle speed (0x0D)
    Speed = 0x0D,
    /// Timing advance (0x0E)
    TimingAdvance = 0x0E,
    /// Intake air temperature (0x0F)
    IntakeTemp = 0x0F,
    /// Mass air flow rate (0x10)
    Maf = 0x10,
    /// Throttle position (0x11)
    ThrottlePosition = 0x11,
    /// Commanded secondary air status (0x12)
    AirStatus = 0x12,
    /// Oxygen sensors present, two banks (0x13)
    O2SensorsPresent = 0x13,
    /// Oxygen sensor voltage bank 1, sensor 1 (0x14)
    O2Voltage = 0x14,
    /// OBD standards this vehicle conforms to (0x1C)
    ObdCompliance = 0x1C,
    /// Oxygen sensors present, four banks (0x1D)
    O2SensorsPresentAlt = 0x1D,
    /// Auxiliary input status (0x1E)
    AuxInputStatus = 0x1E,
    /// Run time since engine start (0x1F)
    RunTime = 0x1F,
    /// Distance traveled with MIL on (0x21)
    DistanceWithMil = 0x21,
    /// Fuel rail pressure relative to manifold vacuum (0x22)
    FuelRailPressureVacuum = 0x22,
    /// Fuel rail gauge pressure (0x23)
    FuelRailPressureDirect = 0x23,
    /// Commanded EGR (0x2C)
    CommandedEgr = 0x2C,
    /// EGR error (0x2D)
    EgrError = 0x2D,
    /// Commanded evaporative purge (0x2E)
    EvaporativePurge = 0x2E,
    /// Fuel tank level input (0x2F)
    FuelLevel = 0x2F,
    /// Warm-ups since codes cleared (0x30)
    WarmupsSinceDtcClear = 0x30,
    /// Distance traveled since codes cleared (0x31)
    DistanceSinceDtcClear = 0x31,
    /// Evap system vapor pressure (0x32)
    EvapVaporPressure = 0x32,
    /// Absolute barometric pressure (0x33)
    BarometricPressure = 0x33,
    /// Oxygen sensor 1 equivalence ratio and current (0x34)
    O2Current = 0x34,
    /// Catalyst temperature bank 1, sensor 1 (0x3C)
    CatalystTemp = 0x3C,
    /// Monitor status this drive cycle (0x41)
    MonitorStatusDriveCycle = 0x41,
    /// Control module voltage (0x42)
    ControlModuleVoltage = 0x42,
    /// Absolute load value (0x43)
    AbsoluteLoad = 0x43,
    /// Commanded air-fuel equivalence ratio (0x44)
    CommandedEquivRatio = 0x44,
    /// Relative throttle position (0x45)
    RelativeThrottlePosition = 0x45,
    /// Ambient air temperature (0x46)
    AmbientAirTemp = 0x46,
    /// Maximum value for air flow rate from MAF sensor (0x50)
    MaxMaf = 0x50,
    /// Fuel type (0x51)
    FuelType = 0x51,
    /// Ethanol fuel percentage (0x52)
    EthanolPercent = 0x52,
    /// Absolute evap system vapor pressure (0x53)
    AbsEvapVaporPressure = 0x53,
    /// Evap system vapor pressure, alternate encoding (0x54)
    EvapVaporPressureAlt = 0x54,
    /// Engine oil temperature (0x5C)
    OilTemp = 0x5C,
    /// Fuel injection timing (0x5D)
    FuelInjectionTiming = 0x5D,
    /// Engine fuel rate (0x5E)
    FuelRate = 0x5E,
}

impl Pid {
    /// All catalogued PIDs in ascending order
    pub const ALL: [Pid; 52] = [
        Pid::SupportedPids,
        Pid::MonitorStatus,
        Pid::FreezeDtc,
        Pid::FuelStatus,
        Pid::EngineLoad,
        Pid::CoolantTemp,
        Pid::ShortFuelTrim1,
        Pid::LongFuelTrim1,
        Pid::ShortFuelTrim2,
        Pid::LongFuelTrim2,
        Pid::FuelPressure,
        Pid::IntakeManifoldPressure,
        Pid::Rpm,
        Pid::Speed,
        Pid::TimingAdvance,
        Pid::IntakeTemp,
        Pid::Maf,
        Pid::ThrottlePosition,
        Pid::AirStatus,
        Pid::O2SensorsPresent,
        Pid::O2Voltage,
        Pid::ObdCompliance,
        Pid::O2SensorsPresentAlt,
        Pid::AuxInputStatus,
        Pid::RunTime,
        Pid::DistanceWithMil,
        Pid::FuelRailPressureVacuum,
        Pid::FuelRailPressureDirect,
        Pid::CommandedEgr,
        Pid::EgrError,
        Pid::EvaporativePurge,
        Pid::FuelLevel,
        Pid::WarmupsSinceDtcClear,
        Pid::DistanceSinceDtcClear,
        Pid::EvapVaporPressure,
        Pid::BarometricPressure,
        Pid::O2Current,
        Pid::CatalystTemp,
        Pid::MonitorStatusDriveCycle,
        Pid::ControlModuleVoltage,
        Pid::AbsoluteLoad,
        Pid::CommandedEquivRatio,
        Pid::RelativeThrottlePosition,
        Pid::AmbientAirTemp,
        Pid::MaxMaf,
        Pid::FuelType,
        Pid::EthanolPercent,
        Pid::AbsEvapVaporPressure,
        Pid::EvapVaporPressureAlt,
        Pid::OilTemp,
        Pid::FuelInjectionTiming,
        Pid::FuelRate,
    ];

    /// Get the PID hex value
    pub fn as_hex(&self) -> u8 {
        *self as u8
    }

    /// Look up a catalogued PID by its hex value
    pub fn from_hex(value: u8) -> Option<Pid> {
        Self::ALL.iter().copied().find(|pid| pid.as_hex() == value)
    }

    /// Get the number of data bytes in the response
    pub fn response_bytes(&self) -> usize {
        match self {
            Pid::SupportedPids | Pid::MonitorStatus | Pid::MonitorStatusDriveCycle | Pid::O2Current => 4,
            Pid::FreezeDtc
            | Pid::FuelStatus
            | Pid::Rpm
            | Pid::Maf
            | Pid::O2Voltage
            | Pid::RunTime
            | Pid::DistanceWithMil
            | Pid::FuelRailPressureVacuum
            | Pid::FuelRailPressureDirect
            | Pid::DistanceSinceDtcClear
            | Pid::EvapVaporPressure
            | Pid::CatalystTemp
            | Pid::ControlModuleVoltage
            | Pid::AbsoluteLoad
            | Pid::CommandedEquivRatio
            | Pid::AbsEvapVaporPressure
            | Pid::EvapVaporPressureAlt
            | Pid::FuelInjectionTiming
            | Pid::FuelRate => 2,
            _ => 1,
        }
    }

    /// Decoder for this PID's response payload
    pub fn decoder(&self) -> Decoder {
        match self {
            Pid::SupportedPids => Decoder::Pid,
            Pid::MonitorStatus | Pid::MonitorStatusDriveCycle => Decoder::Status,
            Pid::FreezeDtc => Decoder::SingleDtc,
            Pid::FuelStatus => Decoder::FuelStatus,
            Pid::EngineLoad
            | Pid::ThrottlePosition
            | Pid::CommandedEgr
            | Pid::EvaporativePurge
            | Pid::FuelLevel
            | Pid::RelativeThrottlePosition
            | Pid::EthanolPercent => Decoder::Percent,
            Pid::CoolantTemp | Pid::IntakeTemp | Pid::AmbientAirTemp | Pid::OilTemp => {
                Decoder::Temperature
            }
            Pid::ShortFuelTrim1
            | Pid::LongFuelTrim1
            | Pid::ShortFuelTrim2
            | Pid::LongFuelTrim2
            | Pid::EgrError => Decoder::PercentCentered,
            Pid::FuelPressure => Decoder::FuelPressure,
            Pid::IntakeManifoldPressure | Pid::BarometricPressure => Decoder::Pressure,
            Pid::Rpm => Decoder::Uas(0x07),
            Pid::Speed => Decoder::Uas(0x09),
            Pid::TimingAdvance => Decoder::TimingAdvance,
            Pid::Maf => Decoder::Uas(0x27),
            Pid::AirStatus => Decoder::AirStatus,
            Pid::O2SensorsPresent => Decoder::O2Sensors,
            Pid::O2Voltage => Decoder::SensorVoltage,
            Pid::ObdCompliance => Decoder::ObdCompliance,
            Pid::O2SensorsPresentAlt => Decoder::O2SensorsAlt,
            Pid::AuxInputStatus => Decoder::AuxInputStatus,
            Pid::RunTime => Decoder::Uas(0x12),
            Pid::DistanceWithMil | Pid::DistanceSinceDtcClear => Decoder::Uas(0x25),
            Pid::FuelRailPressureVacuum => Decoder::Uas(0x19),
            Pid::FuelRailPressureDirect => Decoder::Uas(0x1B),
            Pid::WarmupsSinceDtcClear => Decoder::Uas(0x01),
            Pid::EvapVaporPressure => Decoder::EvapPressure,
            Pid::O2Current => Decoder::CurrentCentered,
            Pid::CatalystTemp => Decoder::Uas(0x16),
            Pid::ControlModuleVoltage => Decoder::Uas(0x0B),
            Pid::AbsoluteLoad => Decoder::AbsoluteLoad,
            Pid::CommandedEquivRatio => Decoder::Uas(0x1E),
            Pid::MaxMaf => Decoder::MaxMaf,
            Pid::FuelType => Decoder::FuelType,
            Pid::AbsEvapVaporPressure => Decoder::AbsEvapPressure,
            Pid::EvapVaporPressureAlt => Decoder::EvapPressureAlt,
            Pid::FuelInjectionTiming => Decoder::InjectTiming,
            Pid::FuelRate => Decoder::FuelRate,
        }
    }
}

/// Response from a PID query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidResponse {
    /// The PID that was queried
    pub pid: Pid,
    /// Decoded value
    pub value: DecodeResult,
    /// Raw bytes from the response
    pub raw_bytes: Vec<u8>,
}

impl PidResponse {
    /// Create a new PID response by decoding the data bytes.
    ///
    /// `raw_bytes` holds only the data bytes. The status decoder expects a
    /// leading byte it skips, so the PID byte is put back in front first.
    pub fn decode(pid: Pid, raw_bytes: Vec<u8>) -> CodecResult<Self> {
        let decoder = pid.decoder();
        let value = if decoder == Decoder::Status {
            let mut payload = Vec::with_capacity(raw_bytes.len() + 1);
            payload.push(pid.as_hex());
            payload.extend_from_slice(&raw_bytes);
            decode(decoder, &payload)?
        } else {
            decode(decoder, &raw_bytes)?
        };
        Ok(Self {
            pid,
            value,
            raw_bytes,
        })
    }

    /// Numeric value, if the PID decodes to a measurement
    pub fn measurement(&self) -> Option<f64> {
        match &self.value {
            DecodeResult::Measurement(m) => Some(m.value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Unit;

    #[test]
    fn test_rpm_decode() {
        // 1A 2B => ((0x1A * 256) + 0x2B) / 4 = (26*256 + 43) / 4 = 6699/4 = 1674.75
        let response = PidResponse::decode(Pid::Rpm, vec![0x1A, 0x2B]).unwrap();
        assert!((response.measurement().unwrap() - 1674.75).abs() < 0.01);
    }

    #[test]
    fn test_coolant_temp_decode() {
        // 0x73 = 115, so temp = 115 - 40 = 75°C
        let response = PidResponse::decode(Pid::CoolantTemp, vec![0x73]).unwrap();
        assert!((response.measurement().unwrap() - 75.0).abs() < 0.01);
    }

    #[test]
    fn test_speed_decode() {
        // 0x55 = 85 km/h
        let response = PidResponse::decode(Pid::Speed, vec![0x55]).unwrap();
        assert_eq!(
            response.value,
            DecodeResult::Measurement(crate::unit::Measurement::new(85.0, Unit::KilometersPerHour))
        );
    }

    #[test]
    fn test_fuel_trim_decode() {
        // 0x80 = 128, so trim = (128-128)*100/128 = 0%
        let response = PidResponse::decode(Pid::ShortFuelTrim1, vec![0x80]).unwrap();
        assert!((response.measurement().unwrap() - 0.0).abs() < 0.01);

        // 0x90 = 144, so trim = (144-128)*100/128 = 12.5%
        let response = PidResponse::decode(Pid::ShortFuelTrim1, vec![0x90]).unwrap();
        assert!((response.measurement().unwrap() - 12.5).abs() < 0.01);
    }

    #[test]
    fn test_maf_decode() {
        // 0x01F4 = 500 => 5.00 g/s
        let response = PidResponse::decode(Pid::Maf, vec![0x01, 0xF4]).unwrap();
        assert!((response.measurement().unwrap() - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_text_pid_has_no_measurement() {
        let response = PidResponse::decode(Pid::FuelType, vec![0x04]).unwrap();
        assert_eq!(response.value, DecodeResult::Text("Diesel".to_string()));
        assert!(response.measurement().is_none());
    }

    #[test]
    fn test_monitor_status_data_bytes() {
        // MIL on, 5 codes, spark ignition
        let response = PidResponse::decode(Pid::MonitorStatus, vec![0x85, 0x07, 0xFF, 0x00]).unwrap();
        assert_eq!(response.raw_bytes, vec![0x85, 0x07, 0xFF, 0x00]);
        match response.value {
            DecodeResult::Status(status) => {
                assert!(status.malfunction_indicator_on);
                assert_eq!(status.trouble_code_count, 5);
                assert_eq!(status.ignition_type, crate::status::IgnitionType::Spark);
                assert_eq!(status.engine_tests.len(), 7);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_hex_round_trip() {
        for pid in Pid::ALL {
            assert_eq!(Pid::from_hex(pid.as_hex()), Some(pid));
        }
        assert_eq!(Pid::from_hex(0xFF), None);
    }

    #[test]
    fn test_catalog_decodes_nominal_payloads() {
        for pid in Pid::ALL {
            let result = PidResponse::decode(pid, vec![0x01; pid.response_bytes()]);
            assert!(result.is_ok(), "{:?} failed: {:?}", pid, result);
        }
    }
}
