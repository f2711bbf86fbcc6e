//! Configuration file support for cipher-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/cipher-qa/config.toml` (lowest priority)
//! - Project-local: `.cipher-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

/// Project-local config file name.
const PROJECT_CONFIG: &str = ".cipher-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Metrics engine settings.
    pub engine: EngineConfig,
    /// Assessment thresholds.
    pub thresholds: ThresholdsConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Metrics engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fold rows across the rayon thread pool.
    pub parallel: Option<bool>,
}

/// Assessment threshold configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// Minimum entropy in bits (0.0-8.0).
    pub min_entropy: Option<f64>,
    /// Minimum NPCR (0.0-1.0).
    pub min_npcr: Option<f64>,
    /// Allowed UACI distance from the ideal (0.0-1.0).
    pub uaci_tolerance: Option<f64>,
    /// Maximum absolute correlation (0.0-1.0).
    pub max_correlation: Option<f64>,
    /// Minimum histogram uniformity (0.0-1.0).
    pub min_uniformity: Option<f64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        let t = &self.thresholds;
        let unit_ranged = [
            ("thresholds.min_npcr", t.min_npcr),
            ("thresholds.uaci_tolerance", t.uaci_tolerance),
            ("thresholds.max_correlation", t.max_correlation),
            ("thresholds.min_uniformity", t.min_uniformity),
        ];
        for (key, value) in unit_ranged {
            if let Some(v) = value {
                if !(0.0..=1.0).contains(&v) {
                    return Err(format!("{key} must be 0.0-1.0, got {v}"));
                }
            }
        }
        if let Some(v) = t.min_entropy {
            if !(0.0..=8.0).contains(&v) {
                return Err(format!("thresholds.min_entropy must be 0.0-8.0, got {v}"));
            }
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.engine.parallel = other.engine.parallel.or(self.engine.parallel);

        let t = &mut self.thresholds;
        t.min_entropy = other.thresholds.min_entropy.or(t.min_entropy);
        t.min_npcr = other.thresholds.min_npcr.or(t.min_npcr);
        t.uaci_tolerance = other.thresholds.uaci_tolerance.or(t.uaci_tolerance);
        t.max_correlation = other.thresholds.max_correlation.or(t.max_correlation);
        t.min_uniformity = other.thresholds.min_uniformity.or(t.min_uniformity);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cipher-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.cipher-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
