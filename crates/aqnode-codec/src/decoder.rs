use serde::{Serialize, Serializer};
use tracing::debug;

use aqnode_bits::{read_i16_le_hi_sign, read_u16_le};

use crate::error::{CodecError, Result};
use crate::frame::{
    FIELD_COUNT, FIELD_OFFSETS, FRAME_SIZE, OFFSET_AQI, OFFSET_CO2, OFFSET_HUMIDITY, OFFSET_ID,
    OFFSET_PRESSURE, OFFSET_TEMPERATURE,
};

/// A scaled sensor measurement, or the not-a-number marker the device emits
/// when its sensor accuracy is too low to trust the value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// A trusted reading in the field's physical unit.
    Value(f64),
    /// The device reported raw 0: sensor accuracy below threshold.
    NotANumber,
}

impl Measurement {
    /// True for the not-a-number marker.
    pub fn is_nan(&self) -> bool {
        matches!(self, Measurement::NotANumber)
    }

    /// The numeric value, if one is present.
    pub fn value(&self) -> Option<f64> {
        match self {
            Measurement::Value(v) => Some(*v),
            Measurement::NotANumber => None,
        }
    }
}

impl Serialize for Measurement {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        // Backend consumers expect the literal string "nan", not JSON null.
        match self {
            Measurement::Value(v) => serializer.serialize_f64(*v),
            Measurement::NotANumber => serializer.serialize_str("nan"),
        }
    }
}

/// One decoded uplink report.
///
/// Constructed fresh on every decode; immutable. JSON field names match the
/// decoder historically deployed on the network server (`temp`, `hum`,
/// `press`, `AQI`, `CO2`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    /// Device identifier.
    pub id: i16,
    /// Temperature in degrees Celsius. Device range -273.15..=90.00.
    #[serde(rename = "temp")]
    pub temperature: f64,
    /// Relative humidity in percent. Device range 0.00..=100.00.
    #[serde(rename = "hum")]
    pub humidity: f64,
    /// Barometric pressure in kilopascals. Device range 84.00..=101.33.
    #[serde(rename = "press")]
    pub pressure: f64,
    /// Static air-quality index. Device range 50.0..=500.0; the firmware
    /// sends raw 0 when the index accuracy is below 2.
    #[serde(rename = "AQI")]
    pub air_quality_index: Measurement,
    /// CO2-equivalent concentration in ppm. Device range 600..=10000; raw 0
    /// under the same accuracy rule as the index.
    #[serde(rename = "CO2")]
    pub co2: Measurement,
}

/// Decode a 12-byte uplink payload into a [`SensorReading`].
///
/// `fport` is carried by the transport for interface compatibility and does
/// not affect decoding. Trailing bytes beyond the twelfth are ignored; fewer
/// than twelve fails with [`CodecError::TruncatedFrame`].
pub fn decode_uplink(fport: u8, bytes: &[u8]) -> Result<SensorReading> {
    if bytes.len() < FRAME_SIZE {
        return Err(CodecError::TruncatedFrame { len: bytes.len() });
    }
    debug!(fport, len = bytes.len(), "decoding uplink frame");

    let aqi = read_u16_le(bytes, OFFSET_AQI)?;
    let co2 = read_u16_le(bytes, OFFSET_CO2)?;

    Ok(SensorReading {
        id: read_u16_le(bytes, OFFSET_ID)? as i16,
        temperature: f64::from(read_i16_le_hi_sign(bytes, OFFSET_TEMPERATURE)?) / 100.0,
        humidity: f64::from(read_u16_le(bytes, OFFSET_HUMIDITY)?) / 100.0,
        pressure: f64::from(read_u16_le(bytes, OFFSET_PRESSURE)?) / 100.0,
        air_quality_index: scaled_or_nan(aqi, 10.0),
        co2: scaled_or_nan(co2, 1.0),
    })
}

/// Extract the six unscaled field values in frame order.
///
/// Every field goes through the same signed extraction the decoder uses, so
/// negative bit patterns come back negative here too.
pub fn raw_fields(bytes: &[u8]) -> Result<[i32; FIELD_COUNT]> {
    if bytes.len() < FRAME_SIZE {
        return Err(CodecError::TruncatedFrame { len: bytes.len() });
    }
    let mut fields = [0i32; FIELD_COUNT];
    for (field, offset) in fields.iter_mut().zip(FIELD_OFFSETS) {
        *field = read_u16_le(bytes, offset)?;
    }
    Ok(fields)
}

fn scaled_or_nan(raw: i32, divisor: f64) -> Measurement {
    if raw == 0 {
        Measurement::NotANumber
    } else {
        Measurement::Value(f64::from(raw) / divisor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sample frame captured from device id 4 (AQI and CO2 still warming up).
    const SAMPLE: [u8; 12] = [
        0x04, 0x00, 0xA6, 0x09, 0x22, 0x0F, 0xEF, 0x26, 0x00, 0x00, 0x00, 0x00,
    ];

    #[test]
    fn decodes_sample_frame_with_scaling() {
        let reading = decode_uplink(2, &SAMPLE).unwrap();

        assert_eq!(reading.id, 4);
        assert!((reading.temperature - 24.70).abs() < 1e-9);
        assert!((reading.humidity - 38.74).abs() < 1e-9);
        assert!((reading.pressure - 99.67).abs() < 1e-9);
        assert!(reading.air_quality_index.is_nan());
        assert!(reading.co2.is_nan());
    }

    #[test]
    fn raw_fields_skip_scaling() {
        let bytes = [
            0x04, 0x00, 0x6C, 0x09, 0xDB, 0x0E, 0xF0, 0x26, 0x00, 0x00, 0x00, 0x00,
        ];
        assert_eq!(raw_fields(&bytes).unwrap(), [4, 2412, 3803, 9968, 0, 0]);
    }

    #[test]
    fn nonzero_aqi_and_co2_are_scaled_values() {
        let bytes = [
            0x04, 0x00, 0x6C, 0x09, 0xDB, 0x0E, 0xF0, 0x26, 0xF5, 0x01, 0x58, 0x02,
        ];
        let reading = decode_uplink(2, &bytes).unwrap();

        assert_eq!(reading.air_quality_index, Measurement::Value(50.1));
        assert_eq!(reading.co2, Measurement::Value(600.0));
    }

    #[test]
    fn negative_temperature_decodes_through_the_high_sign_path() {
        let mut bytes = SAMPLE;
        bytes[2] = 0x3C; // -2500 centidegrees
        bytes[3] = 0xF6;
        let reading = decode_uplink(2, &bytes).unwrap();
        assert!((reading.temperature + 25.0).abs() < 1e-9);
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = SAMPLE.to_vec();
        bytes.extend_from_slice(&[0xAA, 0xBB]);
        let reading = decode_uplink(2, &bytes).unwrap();
        assert_eq!(reading.id, 4);
    }

    #[test]
    fn short_payloads_are_rejected() {
        for len in 0..12 {
            let err = decode_uplink(2, &SAMPLE[..len]).unwrap_err();
            assert!(matches!(err, CodecError::TruncatedFrame { len: l } if l == len));
        }
        let err = raw_fields(&SAMPLE[..4]).unwrap_err();
        assert!(matches!(err, CodecError::TruncatedFrame { len: 4 }));
    }

    #[test]
    fn fport_does_not_affect_the_result() {
        let on_port_2 = decode_uplink(2, &SAMPLE).unwrap();
        let on_port_99 = decode_uplink(99, &SAMPLE).unwrap();
        assert_eq!(on_port_2, on_port_99);
    }

    #[test]
    fn reading_serializes_with_wire_field_names() {
        let reading = decode_uplink(2, &SAMPLE).unwrap();
        let json = serde_json::to_value(&reading).unwrap();

        assert_eq!(json["id"], 4);
        assert!((json["temp"].as_f64().unwrap() - 24.70).abs() < 1e-9);
        assert!((json["hum"].as_f64().unwrap() - 38.74).abs() < 1e-9);
        assert!((json["press"].as_f64().unwrap() - 99.67).abs() < 1e-9);
        assert_eq!(json["AQI"], "nan");
        assert_eq!(json["CO2"], "nan");
    }

    #[test]
    fn measurement_value_accessors() {
        assert_eq!(Measurement::Value(42.5).value(), Some(42.5));
        assert_eq!(Measurement::NotANumber.value(), None);
        assert!(!Measurement::Value(0.0).is_nan());
    }
}
