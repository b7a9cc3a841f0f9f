//! Uplink frame decoding and downlink interval encoding for the aqnode
//! air-quality sensor.
//!
//! This is the core value-add layer of aqnode. The device reports one fixed
//! 12-byte frame per uplink (six little-endian 16-bit fields) and accepts a
//! single downlink parameter, the reporting interval, as big-endian bytes.
//!
//! Both directions are pure functions: no transport, no retained state.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod frame;

pub use decoder::{decode_uplink, raw_fields, Measurement, SensorReading};
pub use encoder::{encode_downlink, DeviceConfig, EncodingPolicy, INTERVAL_KEY};
pub use error::{CodecError, Result};
pub use frame::{FIELD_COUNT, FRAME_SIZE};
