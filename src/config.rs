// Configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Prefix reports with the caller's file:line
    #[serde(default = "default_location")]
    pub location: bool,

    /// Append an expected/actual diff to equality failures
    #[serde(default)]
    pub diff: bool,

    /// Colorize the diff
    #[serde(default)]
    pub color: bool,

    /// How values are rendered in reports
    #[serde(default)]
    pub style: ValueStyle,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            location: default_location(),
            diff: false,
            color: false,
            style: ValueStyle::default(),
        }
    }
}

/// Debug rendering used for compared values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueStyle {
    /// Single line, `{:?}`
    #[default]
    Compact,
    /// Multi-line, `{:#?}`
    Pretty,
}

// Default values
pub const ENV_SOFTASSERT_CONFIG: &str = "SOFTASSERT_CONFIG";

fn default_location() -> bool {
    true
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // Check locations in order:
        // 1. $SOFTASSERT_CONFIG
        // 2. .softassertrc (current directory)
        // 3. ~/.softassertrc (home directory)
        // 4. .softassertrc.toml (current directory)
        // 5. ~/.softassertrc.toml (home directory)

        for path in Self::candidate_paths() {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(&path) {
                Ok(config) => {
                    tracing::debug!("Loaded softassert config from {}", path.display());
                    return Some(config);
                }
                Err(e) => {
                    tracing::warn!("Ignoring softassert config: {:#}", e);
                }
            }
        }

        None
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(explicit) = std::env::var_os(ENV_SOFTASSERT_CONFIG) {
            paths.push(PathBuf::from(explicit));
        }

        let cwd = std::env::current_dir().ok();
        let home = dirs::home_dir();

        for name in [".softassertrc", ".softassertrc.toml"] {
            if let Some(cwd) = &cwd {
                paths.push(cwd.join(name));
            }
            if let Some(home) = &home {
                paths.push(home.join(name));
            }
        }

        paths
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Generate configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
