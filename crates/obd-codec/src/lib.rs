//! OBD-II Payload Decoding
//!
//! This crate turns the raw data bytes of an OBD-II response into typed
//! diagnostic values: scaled measurements, readiness status, trouble codes,
//! on-board monitor results and fixed vocabulary lookups. It does no I/O;
//! the transport delivers already-assembled payloads.
//!
//! ```
//! use obd_codec::{decode, Decoder, DecodeResult, Unit};
//!
//! // Coolant temperature: 0x73 = 115 => 75°C
//! let result = decode(Decoder::Temperature, &[0x73]).unwrap();
//! match result {
//!     DecodeResult::Measurement(m) => {
//!         assert_eq!(m.value, 75.0);
//!         assert_eq!(m.unit, Unit::Celsius);
//!     }
//!     _ => unreachable!(),
//! }
//! ```

pub mod bits;
mod config;
mod decoder;
pub mod dtc;
mod error;
pub mod monitor;
mod pid;
pub mod primitives;
pub mod scaling;
pub mod status;
pub mod tables;
mod unit;

pub use bits::BitView;
pub use config::{DecodeConfig, NO_DESCRIPTION};
pub use decoder::{decode, decode_report, DecodeResult, Decoded, Decoder, ObdDecoder};
pub use dtc::TroubleCode;
pub use error::{CodecResult, DecodeError};
pub use monitor::{Monitor, MonitorTest};
pub use pid::{Pid, PidResponse};
pub use scaling::ScaleEntry;
pub use status::{IgnitionType, Status, StatusTest};
pub use unit::{Measurement, Unit};
