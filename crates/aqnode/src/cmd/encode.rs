use aqnode_codec::{encode_downlink, DeviceConfig, EncodingPolicy};

use crate::cmd::EncodeArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{policy_name, print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let config = resolve_config(&args)?;
    let policy = EncodingPolicy::from(args.policy);

    let bytes = encode_downlink(args.fport, &config, policy);
    if bytes.is_empty() {
        let detail = match config.interval() {
            Some(interval) => format!(
                "interval {interval} is not encodable under the {} policy",
                policy_name(policy)
            ),
            None => "no positive interval entry in the configuration".to_string(),
        };
        return Err(CliError::new(DATA_INVALID, detail));
    }

    // The selected interval is Some here, or the encoding would be empty.
    let interval = config.interval().unwrap_or_default();
    print_encoded(interval, policy, &bytes, format);

    Ok(SUCCESS)
}

fn resolve_config(args: &EncodeArgs) -> CliResult<DeviceConfig> {
    if let Some(json) = &args.config {
        return serde_json::from_str(json)
            .map_err(|err| CliError::new(USAGE, format!("--config is not a valid object: {err}")));
    }
    if let Some(interval) = args.interval {
        return Ok(DeviceConfig::with_interval(interval));
    }
    Err(CliError::new(
        USAGE,
        "an interval is required (--interval or --config)",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::PolicyArg;

    fn args(interval: Option<i64>, config: Option<&str>) -> EncodeArgs {
        EncodeArgs {
            interval,
            config: config.map(String::from),
            policy: PolicyArg::Fixed,
            fport: 2,
        }
    }

    #[test]
    fn resolve_config_from_interval_flag() {
        let config = resolve_config(&args(Some(300), None)).unwrap();
        assert_eq!(config.interval(), Some(300));
    }

    #[test]
    fn resolve_config_from_json_object() {
        let config = resolve_config(&args(None, Some(r#"{"interval": 60}"#))).unwrap();
        assert_eq!(config.interval(), Some(60));
    }

    #[test]
    fn resolve_config_rejects_malformed_json() {
        let err = resolve_config(&args(None, Some("not-json"))).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn unencodable_interval_maps_to_data_invalid() {
        let err = run(args(Some(0), None), OutputFormat::Json).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);

        let err = run(args(Some(100_000), None), OutputFormat::Json).unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }
}
