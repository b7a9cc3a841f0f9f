//! Uplink frame layout.
//!
//! One report is exactly 12 bytes on the wire:
//!
//! ```text
//! ┌────────┬────────┬────────┬────────┬────────┬────────┐
//! │ id     │ temp   │ hum    │ press  │ AQI    │ CO2    │
//! │ 2B LE  │ 2B LE  │ 2B LE  │ 2B LE  │ 2B LE  │ 2B LE  │
//! └────────┴────────┴────────┴────────┴────────┴────────┘
//! ```
//!
//! Trailing bytes beyond the twelfth are ignored.

/// Total frame size in bytes.
pub const FRAME_SIZE: usize = 12;

/// Number of 16-bit fields in a frame.
pub const FIELD_COUNT: usize = 6;

/// Byte offsets of the fields, in frame order.
pub const FIELD_OFFSETS: [usize; FIELD_COUNT] = [
    OFFSET_ID,
    OFFSET_TEMPERATURE,
    OFFSET_HUMIDITY,
    OFFSET_PRESSURE,
    OFFSET_AQI,
    OFFSET_CO2,
];

/// Device identifier.
pub const OFFSET_ID: usize = 0;
/// Temperature, centidegrees Celsius.
pub const OFFSET_TEMPERATURE: usize = 2;
/// Relative humidity, centipercent.
pub const OFFSET_HUMIDITY: usize = 4;
/// Barometric pressure, decapascals (the firmware pre-divides pascals by ten).
pub const OFFSET_PRESSURE: usize = 6;
/// Static air-quality index, deci-points.
pub const OFFSET_AQI: usize = 8;
/// CO2-equivalent concentration, ppm.
pub const OFFSET_CO2: usize = 10;
