use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::{DEFAULT_DISTANCE_UNIT, DEFAULT_RADIUS};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// Reduction settings
#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    /// Number of ranked relations that introduce neighbor nodes.
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Minimum similarity for an edge. Values >= 1 are read as percentages.
    #[serde(default)]
    pub threshold: f64,
    /// How many levels of neighbor pages to generate beyond the query words.
    #[serde(default)]
    pub depth: usize,
    /// Show only the part of a name before its first underscore.
    #[serde(default)]
    pub split_hyphen: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            threshold: 0.0,
            depth: 0,
            split_hyphen: false,
            log_level: default_log_level(),
        }
    }
}

impl GraphConfig {
    /// Threshold as a similarity in [0, 1).
    pub fn threshold(&self) -> f64 {
        normalize_threshold(self.threshold)
    }
}

/// Physics and styling parameters handed to the force-layout engine
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_distance_unit")]
    pub distance_unit: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    #[serde(default = "default_charge")]
    pub charge: f64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_link_stroke_width")]
    pub link_stroke_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            distance_unit: default_distance_unit(),
            radius: default_radius(),
            gravity: default_gravity(),
            charge: default_charge(),
            width: default_width(),
            height: default_height(),
            link_stroke_width: default_link_stroke_width(),
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Output directory; a timestamped directory is used when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl ExportConfig {
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| {
            PathBuf::from(format!(
                "vec2graph-{}",
                chrono::Local::now().format("%Y%m%d-%H%M%S")
            ))
        })
    }
}

fn default_top_n() -> usize {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_distance_unit() -> f64 {
    DEFAULT_DISTANCE_UNIT
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_gravity() -> f64 {
    0.05
}

fn default_charge() -> f64 {
    -100.0
}

fn default_width() -> u32 {
    960
}

fn default_height() -> u32 {
    600
}

fn default_link_stroke_width() -> f64 {
    1.0
}

/// Smallest radius (exclusive) that keeps every link distance positive.
pub const MIN_RADIUS: f64 = 1.0 / std::f64::consts::E;

/// Thresholds of 1 or more are percentages (e.g. `50` means `0.5`).
pub fn normalize_threshold(threshold: f64) -> f64 {
    if threshold < 1.0 {
        threshold
    } else {
        threshold / 100.0
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in VEC2GRAPH_CONFIG environment variable
    /// 2. ./vec2graph.toml in current directory
    ///
    /// When neither exists, the defaults are used.
    pub fn load() -> Result<Self> {
        // Optional .env file
        let _ = dotenv::dotenv();

        match std::env::var("VEC2GRAPH_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path)),
            Err(_) => {
                let path = PathBuf::from("vec2graph.toml");
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    log::debug!("No vec2graph.toml found, using default configuration");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load and validate a specific config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(config_str).context("Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.graph.top_n == 0 {
            anyhow::bail!("graph.top_n must be greater than 0");
        }

        let threshold = self.graph.threshold();
        if !threshold.is_finite() || !(0.0..1.0).contains(&threshold) {
            anyhow::bail!(
                "graph.threshold must be a similarity in [0, 1) or a percentage below 100, got {}",
                self.graph.threshold
            );
        }

        if !(self.layout.distance_unit > 0.0) {
            anyhow::bail!("layout.distance_unit must be greater than 0");
        }

        // x ln x bottoms out at -1/e, so link lengths stay positive only above it.
        if !(self.layout.radius > MIN_RADIUS) {
            anyhow::bail!(
                "layout.radius must be greater than 1/e (~{:.3}), got {}",
                MIN_RADIUS,
                self.layout.radius
            );
        }

        if self.layout.width == 0 || self.layout.height == 0 {
            anyhow::bail!("layout.width and layout.height must be greater than 0");
        }

        if !(self.layout.link_stroke_width > 0.0) {
            anyhow::bail!("layout.link_stroke_width must be greater than 0");
        }

        Ok(())
    }
}
