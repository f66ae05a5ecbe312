use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker of the container the control panel is injected into
pub const DEFAULT_CONTAINER_MARKER: &str = "table-sizer-controls";

/// Where a press-down on a header cell starts a resize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HitZone {
    /// Only the rightmost `px` pixels of the header cell
    EdgeBand { px: u32 },
    /// Anywhere on the header cell
    WholeHeader,
}

impl Default for HitZone {
    fn default() -> Self {
        HitZone::EdgeBand { px: 8 }
    }
}

impl HitZone {
    /// Whether a press at `x` on a header spanning `left..right` qualifies
    pub fn contains(&self, x: i32, left: i32, right: i32) -> bool {
        match self {
            HitZone::WholeHeader => x >= left && x <= right,
            HitZone::EdgeBand { px } => {
                let distance = i64::from(right) - i64::from(x);
                x >= left && x <= right && distance <= i64::from(*px)
            }
        }
    }
}

/// Width limits and paddings used by resize and auto-size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingConfig {
    /// Floor for dragged and auto-sized widths
    pub min_width: u32,
    /// Ceiling for auto-sized widths
    pub max_width: u32,
    /// Added to the widest content when auto-sizing
    pub auto_size_padding: u32,
    pub hit_zone: HitZone,
    /// Padding the default layout adds around cell content
    pub cell_padding: u32,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            min_width: 100,
            max_width: 800,
            auto_size_padding: 40,
            hit_zone: HitZone::default(),
            cell_padding: 30,
        }
    }
}

impl SizingConfig {
    /// Clamp an auto-size candidate into `[min_width, max_width]`
    pub fn clamp_auto(&self, width: u32) -> u32 {
        let max = self.max_width.max(self.min_width);
        width.clamp(self.min_width, max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sizing: SizingConfig,
    pub container_marker: String,
    /// Pixels per terminal cell
    pub cell_px: u32,
    /// Maximum gap between two clicks of a double-click
    pub double_click_ms: u64,
    pub tick_rate_ms: u64,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sizing: SizingConfig::default(),
            container_marker: DEFAULT_CONTAINER_MARKER.to_string(),
            cell_px: 8,
            double_click_ms: 400,
            tick_rate_ms: 100,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".table-sizer"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Default log file location
    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("table-sizer.log"))
    }

    /// Load the config from the default location
    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to `path`, or to the default location
    pub fn save(&self, path: Option<&Path>) -> anyhow::Result<PathBuf> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()
                .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?,
        };

        // Create config directory if it doesn't exist
        if let Some(dir) = config_path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(config_path)
    }

    pub fn log_level_filter(&self) -> log::LevelFilter {
        self.log_level
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}
