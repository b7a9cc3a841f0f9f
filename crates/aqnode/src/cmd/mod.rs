use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use aqnode_codec::EncodingPolicy;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode an uplink payload into a sensor reading.
    Decode(DecodeArgs),
    /// Encode a reporting interval into downlink bytes.
    Encode(EncodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex-encoded payload (whitespace tolerated).
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the raw payload from a file.
    #[arg(long, value_name = "PATH", conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Application port the frame arrived on (the device uplinks on 2).
    #[arg(long, default_value = "2")]
    pub fport: u8,
    /// Print the six unscaled field values instead of the scaled reading.
    #[arg(long)]
    pub raw_fields: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Reporting interval in seconds.
    #[arg(long, conflicts_with = "config")]
    pub interval: Option<i64>,
    /// Full configuration object as JSON, e.g. '{"interval":300}'.
    #[arg(long, value_name = "JSON", conflicts_with = "interval")]
    pub config: Option<String>,
    /// Downlink byte layout expected by the target device fleet.
    #[arg(long, value_enum, default_value = "fixed")]
    pub policy: PolicyArg,
    /// Application port to queue the downlink on.
    #[arg(long, default_value = "2")]
    pub fport: u8,
}

#[derive(Args, Debug, Default)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum PolicyArg {
    Fixed,
    Minimal,
}

impl From<PolicyArg> for EncodingPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Fixed => EncodingPolicy::Fixed,
            PolicyArg::Minimal => EncodingPolicy::Minimal,
        }
    }
}
