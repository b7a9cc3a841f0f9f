//! Codec for the aqnode air-quality sensor.
//!
//! aqnode translates between the sensor's fixed 12-byte uplink frame and
//! named physical-unit readings, and serializes the single downlink
//! parameter, the reporting interval, into device-ready bytes.
//!
//! # Crate Structure
//!
//! - [`bits`] — Sign extension and little-endian field extraction
//! - [`codec`] — Uplink frame decoding and downlink interval encoding

/// Re-export bit extraction types.
pub mod bits {
    pub use aqnode_bits::*;
}

/// Re-export codec types.
pub mod codec {
    pub use aqnode_codec::*;
}

pub use aqnode_codec::{
    decode_uplink, encode_downlink, DeviceConfig, EncodingPolicy, Measurement, SensorReading,
};
