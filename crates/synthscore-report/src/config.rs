//! Report configuration and loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use synthscore_core::layout::LayoutConfig;
use synthscore_core::statistics::ThresholdTable;

use crate::style::StyleConfig;

/// Top-level synthscore configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthscoreConfig {
    /// Page geometry and text metrics.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Fonts, palette and placeholder text.
    #[serde(default)]
    pub style: StyleConfig,
    /// Communication-status thresholds.
    #[serde(default)]
    pub thresholds: ThresholdTable,
    /// Output directory for exported reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./synthscore-reports")
}

impl Default for SynthscoreConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            thresholds: ThresholdTable::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `synthscore.toml` in the current directory
/// 2. `~/.config/synthscore/config.toml`
///
/// Environment variable override: `SYNTHSCORE_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<SynthscoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("synthscore.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SynthscoreConfig::default(),
    };

    if let Ok(dir) = std::env::var("SYNTHSCORE_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    tracing::debug!(path = ?config_path, "loaded configuration");
    Ok(config)
}

/// Parse and validate a TOML config string.
pub fn parse_config(content: &str) -> Result<SynthscoreConfig> {
    let config: SynthscoreConfig = toml::from_str(content)?;
    config.layout.validate().context("invalid [layout] section")?;
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("synthscore"))
}
