//! Configuration module
//!
//! Runtime reporter configuration, plus loading it from files and the environment.

mod env;
mod file;

pub use env::{print_env_help, EnvBuilder, EnvConfig, EnvGuard};
pub use file::ReporterOptions;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::report::{FileNameFormat, SuiteNameFormat};

/// Reporter configuration
#[derive(Clone)]
pub struct ReporterConfig {
    /// Directory reports are written to; nothing is written without it
    pub output_dir: Option<PathBuf>,

    /// Naming strategy overriding the default file name
    pub output_file_format: Option<Arc<dyn FileNameFormat>>,

    /// Appended to the capability label in every `classname`
    pub package_name: Option<String>,

    /// Split pattern used to sanitize suite and test names
    pub suite_name_format: SuiteNameFormat,

    /// Embed captured commands and results as `<system-out>`
    pub write_standard_output: bool,

    /// Prefix stripped from spec file paths (defaults to the working directory)
    pub base_dir: Option<PathBuf>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            output_file_format: None,
            package_name: None,
            suite_name_format: SuiteNameFormat::default(),
            write_standard_output: true,
            base_dir: None,
        }
    }
}

impl ReporterConfig {
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_output_file_format(mut self, format: impl FileNameFormat + 'static) -> Self {
        self.output_file_format = Some(Arc::new(format));
        self
    }

    pub fn with_package_name(mut self, package_name: impl Into<String>) -> Self {
        self.package_name = Some(package_name.into());
        self
    }

    pub fn with_suite_name_format(mut self, format: SuiteNameFormat) -> Self {
        self.suite_name_format = format;
        self
    }

    pub fn with_write_standard_output(mut self, enabled: bool) -> Self {
        self.write_standard_output = enabled;
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }
}

impl fmt::Debug for ReporterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReporterConfig")
            .field("output_dir", &self.output_dir)
            .field(
                "output_file_format",
                &self.output_file_format.as_ref().map(|_| "<custom>"),
            )
            .field("package_name", &self.package_name)
            .field("suite_name_format", &self.suite_name_format)
            .field("write_standard_output", &self.write_standard_output)
            .field("base_dir", &self.base_dir)
            .finish()
    }
}
