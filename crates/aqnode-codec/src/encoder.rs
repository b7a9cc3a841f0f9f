use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// The only downlink parameter the device understands.
pub const INTERVAL_KEY: &str = "interval";

/// Downlink interval byte layout.
///
/// Two generations of deployed firmware expect different layouts; which
/// fleet wants which is a per-deployment choice, selected on every encode
/// call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingPolicy {
    /// Exactly two bytes, big-endian. Intervals above 65535 are unencodable
    /// and yield an empty sequence.
    #[default]
    Fixed,
    /// The shortest big-endian sequence with no leading zero byte: one byte
    /// below 256, two through 65535, and so on unbounded.
    Minimal,
}

/// Downlink device configuration.
///
/// Entries keep their insertion order, mirroring how the network server's
/// scripting runtime iterated configuration objects. [`INTERVAL_KEY`] is the
/// only key the encoder recognizes; when it appears more than once, the last
/// encodable occurrence wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceConfig {
    entries: Vec<(String, i64)>,
}

impl DeviceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Config carrying a single `interval` entry, in seconds.
    pub fn with_interval(seconds: i64) -> Self {
        let mut config = Self::new();
        config.set(INTERVAL_KEY, seconds);
        config
    }

    /// Append an entry. Duplicate keys are kept; the encoder resolves them
    /// by taking the last match.
    pub fn set(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.entries.push((key.into(), value));
        self
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(String, i64)] {
        &self.entries
    }

    /// The interval the encoder would select: the last `interval` entry with
    /// a strictly positive value, if any.
    pub fn interval(&self) -> Option<i64> {
        self.entries
            .iter()
            .rev()
            .find(|(key, value)| key == INTERVAL_KEY && *value > 0)
            .map(|(_, value)| *value)
    }
}

impl Serialize for DeviceConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DeviceConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = DeviceConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of configuration entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut config = DeviceConfig::new();
                // Document order is preserved; non-integer values belong to
                // keys the encoder ignores anyway, so they are dropped.
                while let Some((key, value)) =
                    map.next_entry::<String, serde_json::Value>()?
                {
                    if let Some(value) = value.as_i64() {
                        config.set(key, value);
                    }
                }
                Ok(config)
            }
        }

        deserializer.deserialize_map(ConfigVisitor)
    }
}

/// Encode the downlink configuration into interval bytes.
///
/// `fport` is carried by the transport for interface compatibility and does
/// not affect encoding. Returns an empty buffer when the config has no
/// positive `interval` entry, or when the selected value is unencodable
/// under `policy`; emptiness is the caller's signal, not an error.
pub fn encode_downlink(fport: u8, config: &DeviceConfig, policy: EncodingPolicy) -> Bytes {
    let Some(interval) = config.interval() else {
        return Bytes::new();
    };
    debug!(fport, interval, ?policy, "encoding downlink interval");
    match policy {
        EncodingPolicy::Fixed => encode_fixed(interval),
        EncodingPolicy::Minimal => encode_minimal(interval),
    }
}

fn encode_fixed(interval: i64) -> Bytes {
    if interval > i64::from(u16::MAX) {
        return Bytes::new();
    }
    let mut buf = BytesMut::with_capacity(2);
    buf.put_u16(interval as u16);
    buf.freeze()
}

fn encode_minimal(interval: i64) -> Bytes {
    let mut value = interval as u64;
    let mut buf = Vec::new();
    while value > 0 {
        buf.push((value & 0xFF) as u8);
        value >>= 8;
    }
    buf.reverse();
    Bytes::from(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big_endian_value(bytes: &Bytes) -> u64 {
        bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b))
    }

    #[test]
    fn fixed_policy_emits_two_bytes() {
        let config = DeviceConfig::with_interval(300);
        let bytes = encode_downlink(2, &config, EncodingPolicy::Fixed);
        assert_eq!(bytes.as_ref(), [0x01, 0x2C]);
    }

    #[test]
    fn fixed_policy_pads_small_values() {
        let bytes = encode_downlink(2, &DeviceConfig::with_interval(5), EncodingPolicy::Fixed);
        assert_eq!(bytes.as_ref(), [0x00, 0x05]);
    }

    #[test]
    fn fixed_policy_rejects_values_above_u16() {
        let bytes = encode_downlink(2, &DeviceConfig::with_interval(65536), EncodingPolicy::Fixed);
        assert!(bytes.is_empty());

        let at_max = encode_downlink(2, &DeviceConfig::with_interval(65535), EncodingPolicy::Fixed);
        assert_eq!(at_max.as_ref(), [0xFF, 0xFF]);
    }

    #[test]
    fn minimal_policy_drops_leading_zero_bytes() {
        let bytes = encode_downlink(2, &DeviceConfig::with_interval(5), EncodingPolicy::Minimal);
        assert_eq!(bytes.as_ref(), [0x05]);

        let bytes = encode_downlink(2, &DeviceConfig::with_interval(300), EncodingPolicy::Minimal);
        assert_eq!(bytes.as_ref(), [0x01, 0x2C]);
    }

    #[test]
    fn minimal_policy_grows_past_two_bytes() {
        let bytes = encode_downlink(
            2,
            &DeviceConfig::with_interval(0x0111_70),
            EncodingPolicy::Minimal,
        );
        assert_eq!(bytes.as_ref(), [0x01, 0x11, 0x70]);
    }

    #[test]
    fn non_positive_or_missing_interval_yields_empty_output() {
        for policy in [EncodingPolicy::Fixed, EncodingPolicy::Minimal] {
            assert!(encode_downlink(2, &DeviceConfig::with_interval(0), policy).is_empty());
            assert!(encode_downlink(2, &DeviceConfig::with_interval(-60), policy).is_empty());
            assert!(encode_downlink(2, &DeviceConfig::new(), policy).is_empty());

            let mut unrelated = DeviceConfig::new();
            unrelated.set("threshold", 7);
            assert!(encode_downlink(2, &unrelated, policy).is_empty());
        }
    }

    #[test]
    fn last_positive_interval_entry_wins() {
        let mut config = DeviceConfig::new();
        config.set(INTERVAL_KEY, 60).set("threshold", 7);
        config.set(INTERVAL_KEY, 300).set(INTERVAL_KEY, -1);

        assert_eq!(config.interval(), Some(300));
        let bytes = encode_downlink(2, &config, EncodingPolicy::Fixed);
        assert_eq!(bytes.as_ref(), [0x01, 0x2C]);
    }

    #[test]
    fn round_trips_as_big_endian_unsigned() {
        for interval in [1, 5, 255, 256, 300, 3600, 65535] {
            let config = DeviceConfig::with_interval(interval);
            for policy in [EncodingPolicy::Fixed, EncodingPolicy::Minimal] {
                let bytes = encode_downlink(2, &config, policy);
                assert_eq!(big_endian_value(&bytes), interval as u64, "{policy:?}");
            }
        }
        // Only the minimal layout can carry values past two bytes.
        let wide = encode_downlink(2, &DeviceConfig::with_interval(86400), EncodingPolicy::Minimal);
        assert_eq!(big_endian_value(&wide), 86400);
    }

    #[test]
    fn config_deserializes_in_document_order() {
        let config: DeviceConfig =
            serde_json::from_str(r#"{"threshold": 7, "interval": 300, "name": "node-4"}"#)
                .unwrap();

        assert_eq!(config.interval(), Some(300));
        // "name" is non-integer and belongs to an ignored key; it is dropped.
        assert_eq!(
            config.entries(),
            [("threshold".to_string(), 7), (INTERVAL_KEY.to_string(), 300)]
        );
    }

    #[test]
    fn config_serialization_round_trip() {
        let mut config = DeviceConfig::new();
        config.set(INTERVAL_KEY, 300).set("threshold", 7);

        let json = serde_json::to_string(&config).unwrap();
        let back: DeviceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
