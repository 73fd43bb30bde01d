use std::path::PathBuf;

use serde::Deserialize;

use super::telemetry::TelemetryConfig;

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the five collection documents and any rendered
    /// reports.
    pub data_dir: PathBuf,
    pub telemetry: TelemetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            telemetry: TelemetryConfig::default(),
        }
    }
}

/// Layer a YAML file (when present) and `BILLING__`-prefixed environment
/// variables over the defaults.
pub fn load_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut builder = config::Config::builder();
    builder = match path {
        Some(path) => builder.add_source(config::File::with_name(path)),
        None => builder.add_source(config::File::with_name("billing").required(false)),
    };
    let settings = builder
        .add_source(config::Environment::with_prefix("BILLING").separator("__"))
        .build()?;
    Ok(settings.try_deserialize()?)
}
