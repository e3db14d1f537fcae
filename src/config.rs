use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level driver configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KoppenConfig {
    /// Analysis period.
    pub period: PeriodToml,

    /// Input field documents.
    #[serde(default)]
    pub input: InputToml,

    /// Classification settings.
    #[serde(default)]
    pub classify: ClassifyToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl KoppenConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &std::path::Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

/// Inclusive year range of the climatologies.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PeriodToml {
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputToml {
    /// Temperature field document.
    pub tas: Option<PathBuf>,
    /// Precipitation field document.
    pub pr: Option<PathBuf>,
    /// Expected variable name in the temperature document.
    #[serde(default = "default_tas_var")]
    pub tas_var: String,
    /// Expected variable name in the precipitation document.
    #[serde(default = "default_pr_var")]
    pub pr_var: String,
    /// Extra factor applied on top of the kg m-2 s-1 to mm/day conversion.
    #[serde(default = "default_pr_conversion_factor")]
    pub pr_conversion_factor: f64,
}

impl Default for InputToml {
    fn default() -> Self {
        Self {
            tas: None,
            pr: None,
            tas_var: default_tas_var(),
            pr_var: default_pr_var(),
            pr_conversion_factor: default_pr_conversion_factor(),
        }
    }
}

fn default_tas_var() -> String {
    "tas".to_string()
}
fn default_pr_var() -> String {
    "pr".to_string()
}
fn default_pr_conversion_factor() -> f64 {
    1.0
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClassifyToml {
    /// Convention names, each classified independently.
    #[serde(default = "default_conventions")]
    pub conventions: Vec<String>,
    /// Per-convention summer half-year source ("temperature" or
    /// "latitude"), keyed by convention name. Unlisted conventions keep
    /// their usual source.
    #[serde(default)]
    pub summer: BTreeMap<String, String>,
    /// Clip seasons that cross the period boundary instead of skipping them.
    #[serde(default)]
    pub truncate_seasons: bool,
}

impl Default for ClassifyToml {
    fn default() -> Self {
        Self {
            conventions: default_conventions(),
            summer: BTreeMap::new(),
            truncate_seasons: false,
        }
    }
}

fn default_conventions() -> Vec<String> {
    vec!["Kottek06".to_string()]
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// Output JSON document.
    pub path: Option<PathBuf>,
}
