//! Command line arguments

use crate::config::{Config, HitZone};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "table-sizer",
    version,
    about = "Resize and auto-fit table columns with the mouse"
)]
pub struct Cli {
    /// Documents to open (.json, .yaml, .yml or .csv); shows a sample page if omitted
    pub paths: Vec<PathBuf>,

    /// Config file to use instead of ~/.table-sizer/config.json
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Start a resize from anywhere on a header cell
    #[arg(long, conflicts_with = "edge_band")]
    pub whole_header: bool,

    /// Width in pixels of the grab band at a header's right edge
    #[arg(long, value_name = "PX")]
    pub edge_band: Option<u32>,

    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// off, error, warn, info, debug or trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Write the effective config and exit
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Config from `--config` or the default location, falling back to defaults
    pub fn load_config(&self) -> Config {
        let loaded = match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        };
        loaded.unwrap_or_default()
    }

    /// Apply command line overrides on top of a loaded config
    pub fn apply(&self, config: &mut Config) {
        if self.whole_header {
            config.sizing.hit_zone = HitZone::WholeHeader;
        } else if let Some(px) = self.edge_band {
            config.sizing.hit_zone = HitZone::EdgeBand { px };
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
    }

    /// Log file from `--log-file` or the default location
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(Config::log_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paths_and_flags() {
        let cli = Cli::try_parse_from([
            "table-sizer",
            "a.yaml",
            "b.csv",
            "--edge-band",
            "12",
            "--log-level",
            "debug",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.paths, vec![PathBuf::from("a.yaml"), PathBuf::from("b.csv")]);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.sizing.hit_zone, HitZone::EdgeBand { px: 12 });
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_whole_header_override() {
        let cli = Cli::try_parse_from(["table-sizer", "--whole-header"]).expect("should parse");
        let mut config = Config::default();
        cli.apply(&mut config);

        assert!(cli.paths.is_empty());
        assert_eq!(config.sizing.hit_zone, HitZone::WholeHeader);
    }

    #[test]
    fn test_whole_header_conflicts_with_edge_band() {
        let result = Cli::try_parse_from(["table-sizer", "--whole-header", "--edge-band", "4"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let cli = Cli::try_parse_from(["table-sizer"]).expect("should parse");
        let mut config = Config::default();
        config.sizing.hit_zone = HitZone::EdgeBand { px: 3 };
        cli.apply(&mut config);

        assert_eq!(config.sizing.hit_zone, HitZone::EdgeBand { px: 3 });
        assert_eq!(config.log_level, "info");
    }
}
