//! Command-line arguments for the orrery window.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

/// Animated orrery.
///
/// CLI values override settings loaded from the config file.
#[derive(Parser, Debug)]
#[command(name = "orrery", about = "Animated solar system orrery")]
pub struct CliArgs {
    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective config to this path and exit.
    #[arg(long)]
    pub write_config: Option<PathBuf>,

    /// Seconds between animation steps.
    #[arg(long)]
    pub interval: Option<f64>,

    /// Number of points in each orbit ring.
    #[arg(long)]
    pub segments: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(interval) = args.interval {
            self.pacing.update_interval_seconds = interval;
        }
        if let Some(segments) = args.segments {
            self.ring.segment_count = segments;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(["orrery", "--interval", "0.05", "--segments", "12"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.pacing.update_interval_seconds, 0.05);
        assert_eq!(config.ring.segment_count, 12);
        // Non-overridden fields retain defaults
        assert_eq!(config.debug.log_level, "info");
        assert_eq!(config.pacing.step_size, 0.1);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            config: None,
            write_config: None,
            interval: None,
            segments: None,
            log_level: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }
}
