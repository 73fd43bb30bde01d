use serde::{Deserialize, Serialize};
use tracing::metadata::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Console logging configuration.
#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct TelemetryConfig {
    pub enable: bool,
    pub max_level: LoggingLevel,
    /// Custom filter directives, e.g. `service_billing=debug`.
    pub level_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enable: true,
            max_level: LoggingLevel::default(),
            level_filter: String::default(),
        }
    }
}

#[derive(Default, Deserialize, Serialize, Clone, Debug)]
pub enum LoggingLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
    Off,
}

impl From<LoggingLevel> for LevelFilter {
    fn from(val: LoggingLevel) -> Self {
        match val {
            LoggingLevel::Error => LevelFilter::ERROR,
            LoggingLevel::Warn => LevelFilter::WARN,
            LoggingLevel::Info => LevelFilter::INFO,
            LoggingLevel::Debug => LevelFilter::DEBUG,
            LoggingLevel::Trace => LevelFilter::TRACE,
            LoggingLevel::Off => LevelFilter::OFF,
        }
    }
}

pub fn initialize_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    if !config.enable {
        return Ok(());
    }
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(config.max_level.clone()).into())
        .parse_lossy(config.level_filter.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("telemetry initialization failed: {e}"))?;
    Ok(())
}
