//! Command-line flags

use std::path::PathBuf;

use visage_core::{VisageError, VisageResult};
use visage_runtime::{LogFormat, PlayerConfig};

/// Demo options
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    /// JSON player configuration
    pub config: Option<PathBuf>,
    /// Twice-as-fast timing
    pub fast: bool,
    pub json_logs: bool,
    pub help: bool,
}

pub const USAGE: &str = "usage: talking-head [--config <file>] [--fast] [--json-logs]";

impl Args {
    pub fn parse(args: impl IntoIterator<Item = String>) -> VisageResult<Self> {
        let mut parsed = Args::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().ok_or_else(|| {
                        VisageError::InvalidConfig("--config needs a file".to_string())
                    })?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--fast" => parsed.fast = true,
                "--json-logs" => parsed.json_logs = true,
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(VisageError::InvalidConfig(format!("unknown flag: {other}")))
                }
            }
        }
        Ok(parsed)
    }

    pub fn log_format(&self) -> LogFormat {
        if self.json_logs {
            LogFormat::Json
        } else {
            LogFormat::Plain
        }
    }

    /// Config file if given, else defaults; `--fast` rescales either
    pub fn player_config(&self) -> VisageResult<PlayerConfig> {
        let mut config = match &self.config {
            Some(path) => PlayerConfig::load(path)?,
            None => PlayerConfig::default(),
        };
        if self.fast {
            config.timing = config.timing.scaled(0.5);
        }
        Ok(config)
    }
}
