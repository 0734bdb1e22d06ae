//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "JUNIT_REPORTER";

/// Environment configuration from environment variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Output directory from JUNIT_REPORTER_OUTPUT_DIR
    pub output_dir: Option<String>,
    /// File name template from JUNIT_REPORTER_OUTPUT_FILE_FORMAT
    pub output_file_format: Option<String>,
    /// Package name from JUNIT_REPORTER_PACKAGE_NAME
    pub package_name: Option<String>,
    /// Split pattern from JUNIT_REPORTER_SUITE_NAME_FORMAT
    pub suite_name_format: Option<String>,
    /// Standard output toggle from JUNIT_REPORTER_WRITE_STDOUT
    pub write_standard_output: Option<bool>,
    /// Config file from JUNIT_REPORTER_CONFIG
    pub config_file: Option<String>,
    /// Log level from JUNIT_REPORTER_LOG
    pub log_level: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self {
            output_dir: get_env("OUTPUT_DIR"),
            output_file_format: get_env("OUTPUT_FILE_FORMAT"),
            package_name: get_env("PACKAGE_NAME"),
            suite_name_format: get_env("SUITE_NAME_FORMAT"),
            write_standard_output: get_env_bool("WRITE_STDOUT"),
            config_file: get_env("CONFIG"),
            log_level: get_env("LOG"),
        }
    }

    /// Check if any reporter option is set
    pub fn has_any(&self) -> bool {
        self.output_dir.is_some()
            || self.output_file_format.is_some()
            || self.package_name.is_some()
            || self.suite_name_format.is_some()
            || self.write_standard_output.is_some()
    }

    /// Print current environment configuration
    pub fn print_summary(&self) {
        println!("Environment Configuration:");
        println!("  {}_OUTPUT_DIR:          {:?}", ENV_PREFIX, self.output_dir);
        println!("  {}_OUTPUT_FILE_FORMAT:  {:?}", ENV_PREFIX, self.output_file_format);
        println!("  {}_PACKAGE_NAME:        {:?}", ENV_PREFIX, self.package_name);
        println!("  {}_SUITE_NAME_FORMAT:   {:?}", ENV_PREFIX, self.suite_name_format);
        println!("  {}_WRITE_STDOUT:        {:?}", ENV_PREFIX, self.write_standard_output);
        println!("  {}_CONFIG:              {:?}", ENV_PREFIX, self.config_file);
        println!("  {}_LOG:                 {:?}", ENV_PREFIX, self.log_level);
    }
}

/// Get environment variable with prefix
fn get_env(name: &str) -> Option<String> {
    env::var(format!("{ENV_PREFIX}_{name}")).ok()
}

/// Get environment variable as boolean
fn get_env_bool(name: &str) -> Option<bool> {
    get_env(name).map(|v| {
        matches!(
            v.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on" | "enabled"
        )
    })
}

/// Builder for setting environment variables (useful for testing)
pub struct EnvBuilder {
    vars: Vec<(String, String)>,
}

impl EnvBuilder {
    /// Create a new environment builder
    pub fn new() -> Self {
        Self { vars: Vec::new() }
    }

    /// Set output directory
    pub fn output_dir(mut self, dir: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_OUTPUT_DIR"), dir.into()));
        self
    }

    /// Set package name
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.vars.push((format!("{ENV_PREFIX}_PACKAGE_NAME"), name.into()));
        self
    }

    /// Set standard output toggle
    pub fn write_standard_output(mut self, enabled: bool) -> Self {
        self.vars
            .push((format!("{ENV_PREFIX}_WRITE_STDOUT"), enabled.to_string()));
        self
    }

    /// Apply environment variables
    pub fn apply(self) {
        for (key, value) in self.vars {
            env::set_var(key, value);
        }
    }

    /// Apply and return guard that restores on drop
    pub fn apply_scoped(self) -> EnvGuard {
        let previous: Vec<_> = self
            .vars
            .iter()
            .map(|(k, _)| (k.clone(), env::var(k).ok()))
            .collect();

        self.apply();

        EnvGuard { previous }
    }
}

impl Default for EnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard that restores environment variables on drop
pub struct EnvGuard {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            match value {
                Some(v) => env::set_var(key, v),
                None => env::remove_var(key),
            }
        }
    }
}

/// Print all JUNIT_REPORTER environment variables
pub fn print_env_help() {
    println!("Environment Variables:");
    println!();
    println!("  {ENV_PREFIX}_OUTPUT_DIR          Directory reports are written to");
    println!("  {ENV_PREFIX}_OUTPUT_FILE_FORMAT  File name template ({{capabilities}}, {{cid}})");
    println!("  {ENV_PREFIX}_PACKAGE_NAME        Package qualifier for classnames");
    println!("  {ENV_PREFIX}_SUITE_NAME_FORMAT   Regex used to split suite and test titles");
    println!("  {ENV_PREFIX}_WRITE_STDOUT        Embed captured commands (true/false)");
    println!("  {ENV_PREFIX}_CONFIG              Path to configuration file");
    println!("  {ENV_PREFIX}_LOG                 Log level (trace, debug, info, warn, error)");
    println!();
    println!("Example:");
    println!("  export {ENV_PREFIX}_OUTPUT_DIR=./reports");
    println!("  junit-reporter report --stats stats.json");
}
