use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use aqnode_codec::{EncodingPolicy, Measurement, SensorReading};

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

pub fn print_reading(reading: &SensorReading, format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => {
            println!(
                "{}",
                serde_json::to_string(reading).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE", "UNIT"])
                .add_row(vec!["id".to_string(), reading.id.to_string(), String::new()])
                .add_row(vec![
                    "temperature".to_string(),
                    format!("{:.2}", reading.temperature),
                    "°C".to_string(),
                ])
                .add_row(vec![
                    "humidity".to_string(),
                    format!("{:.2}", reading.humidity),
                    "%RH".to_string(),
                ])
                .add_row(vec![
                    "pressure".to_string(),
                    format!("{:.2}", reading.pressure),
                    "kPa".to_string(),
                ])
                .add_row(vec![
                    "air quality index".to_string(),
                    measurement_cell(&reading.air_quality_index),
                    String::new(),
                ])
                .add_row(vec![
                    "CO2".to_string(),
                    measurement_cell(&reading.co2),
                    "ppm".to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "id={} temp={:.2}°C hum={:.2}% press={:.2}kPa aqi={} co2={}",
                reading.id,
                reading.temperature,
                reading.humidity,
                reading.pressure,
                measurement_cell(&reading.air_quality_index),
                measurement_cell(&reading.co2),
            );
        }
    }
}

pub fn print_raw_fields(fields: &[i32], format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => {
            println!(
                "{}",
                serde_json::to_string(fields).unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["id", "temp", "hum", "press", "AQI", "CO2"])
                .add_row(fields.iter().map(ToString::to_string).collect::<Vec<_>>());
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let rendered: Vec<String> = fields.iter().map(ToString::to_string).collect();
            println!("fields=[{}]", rendered.join(", "));
        }
    }
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    interval: i64,
    policy: &'a str,
    bytes: String,
    len: usize,
}

pub fn print_encoded(interval: i64, policy: EncodingPolicy, bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                interval,
                policy: policy_name(policy),
                bytes: hex::encode(bytes),
                len: bytes.len(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["INTERVAL", "POLICY", "BYTES"])
                .add_row(vec![
                    interval.to_string(),
                    policy_name(policy).to_string(),
                    hex::encode(bytes),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "interval={interval}s policy={} bytes={}",
                policy_name(policy),
                hex::encode(bytes)
            );
        }
        OutputFormat::Raw => {
            // Raw bytes on stdout, ready to pipe into a downlink queue.
            let mut out = std::io::stdout();
            let _ = out.write_all(bytes);
            let _ = out.flush();
        }
    }
}

pub fn policy_name(policy: EncodingPolicy) -> &'static str {
    match policy {
        EncodingPolicy::Fixed => "fixed",
        EncodingPolicy::Minimal => "minimal",
    }
}

fn measurement_cell(measurement: &Measurement) -> String {
    match measurement.value() {
        Some(v) => format!("{v:.1}"),
        None => "nan".to_string(),
    }
}
