//! Configuration file management
//!
//! Handles finding, loading, and validating reporter configuration files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{EnvConfig, ReporterConfig};
use crate::error::ConfigError;
use crate::report::{FileNameTemplate, PayloadLimit, SuiteNameFormat};

/// Configuration file locations (in order of precedence)
const CONFIG_LOCATIONS: &[&str] = &[
    "./junit-reporter.yaml",
    "./junit-reporter.yml",
    "./.junit-reporter.yaml",
    "~/.config/junit-reporter/config.yaml",
];

/// Reporter options as stored in a configuration file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReporterOptions {
    /// Directory reports are written to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// File name template, e.g. `junit-{capabilities}-{cid}.xml`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file_format: Option<String>,

    /// Package qualifier appended to the capability label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,

    /// Regex used to split suite and test titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite_name_format: Option<String>,

    /// Embed captured commands and results
    #[serde(default = "default_write_standard_output")]
    pub write_standard_output: bool,

    /// Prefix stripped from spec file paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,

    /// Size limits for embedded payloads
    #[serde(default)]
    pub payload_limit: PayloadLimit,
}

fn default_write_standard_output() -> bool {
    true
}

impl Default for ReporterOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            output_file_format: None,
            package_name: None,
            suite_name_format: None,
            write_standard_output: default_write_standard_output(),
            base_dir: None,
            payload_limit: PayloadLimit::default(),
        }
    }
}

impl ReporterOptions {
    /// Find configuration file in standard locations
    pub fn find() -> Option<PathBuf> {
        CONFIG_LOCATIONS
            .iter()
            .map(|location| expand_path(location))
            .find(|path| path.exists())
    }

    /// Load configuration from the default location, or defaults if there is none
    pub fn load_default() -> Result<Self> {
        match Self::find() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let options: Self = if is_yaml_file(path) {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?
        } else {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        };

        options
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(options)
    }

    /// Save configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_yaml_file(path) {
            serde_yaml::to_string(self).context("Failed to serialize config")?
        } else {
            serde_json::to_string_pretty(self).context("Failed to serialize config")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the options without building a configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.into_config().map(|_| ())
    }

    /// Build the runtime configuration
    pub fn into_config(&self) -> Result<ReporterConfig, ConfigError> {
        let mut config = ReporterConfig::default().with_write_standard_output(self.write_standard_output);

        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(template) = &self.output_file_format {
            config = config.with_output_file_format(FileNameTemplate::new(template.as_str())?);
        }
        if let Some(package_name) = &self.package_name {
            config = config.with_package_name(package_name.as_str());
        }
        if let Some(pattern) = &self.suite_name_format {
            config = config.with_suite_name_format(SuiteNameFormat::new(pattern)?);
        }
        if let Some(dir) = &self.base_dir {
            config = config.with_base_dir(dir);
        }

        Ok(config)
    }

    /// Apply environment overrides (environment takes precedence)
    pub fn merge_env(&mut self, env: &EnvConfig) {
        if let Some(dir) = &env.output_dir {
            self.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(format) = &env.output_file_format {
            self.output_file_format = Some(format.clone());
        }
        if let Some(package_name) = &env.package_name {
            self.package_name = Some(package_name.clone());
        }
        if let Some(pattern) = &env.suite_name_format {
            self.suite_name_format = Some(pattern.clone());
        }
        if let Some(enabled) = env.write_standard_output {
            self.write_standard_output = enabled;
        }
    }

    /// Generate example configuration
    pub fn example() -> Self {
        Self {
            output_dir: Some(PathBuf::from("./reports/junit")),
            output_file_format: Some("WDIO.xunit.{capabilities}.{cid}.xml".to_string()),
            package_name: None,
            suite_name_format: Some(crate::report::DEFAULT_SUITE_NAME_FORMAT.to_string()),
            write_standard_output: true,
            base_dir: None,
            payload_limit: PayloadLimit::default(),
        }
    }
}

/// Expand ~ to home directory
fn expand_path(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

/// Check if file is YAML based on extension
fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .map(|e| e == "yaml" || e == "yml")
        .unwrap_or(false)
}
