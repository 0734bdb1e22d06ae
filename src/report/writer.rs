//! Report file emission
//!
//! Resolves the report path for an execution context and persists the XML.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::ReporterConfig;
use crate::error::{ConfigError, ReportError};

/// Placeholders understood by [`FileNameTemplate`]
const TEMPLATE_PLACEHOLDERS: &[&str] = &["capabilities", "cid"];

/// Input handed to a [`FileNameFormat`]
pub struct FileNameContext<'a> {
    pub capabilities: &'a str,
    pub cid: &'a str,
    pub config: &'a ReporterConfig,
}

/// Naming strategy for report files
pub trait FileNameFormat: Send + Sync {
    fn file_name(&self, ctx: &FileNameContext<'_>) -> String;
}

impl<F> FileNameFormat for F
where
    F: Fn(&FileNameContext<'_>) -> String + Send + Sync,
{
    fn file_name(&self, ctx: &FileNameContext<'_>) -> String {
        self(ctx)
    }
}

/// Default report file name
pub fn default_file_name(capabilities: &str, cid: &str) -> String {
    format!("WDIO.xunit.{capabilities}.{cid}.xml")
}

/// File name template with `{capabilities}` and `{cid}` placeholders
#[derive(Clone, PartialEq, Eq)]
pub struct FileNameTemplate {
    template: String,
}

impl FileNameTemplate {
    /// Parse and validate a template
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = template.into();
        let invalid = |reason: String| ConfigError::OutputFileFormat {
            template: template.clone(),
            reason,
        };

        if template.trim().is_empty() {
            return Err(invalid("template is empty".to_string()));
        }

        let mut rest = template.as_str();
        while let Some(open) = rest.find(['{', '}']) {
            if rest[open..].starts_with('}') {
                return Err(invalid("unmatched '}'".to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| invalid("unmatched '{'".to_string()))?;
            let name = &after[..close];
            if !TEMPLATE_PLACEHOLDERS.contains(&name) {
                return Err(invalid(format!("unknown placeholder {{{name}}}")));
            }
            rest = &after[close + 1..];
        }

        Ok(Self { template })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

impl FileNameFormat for FileNameTemplate {
    fn file_name(&self, ctx: &FileNameContext<'_>) -> String {
        self.template
            .replace("{capabilities}", ctx.capabilities)
            .replace("{cid}", ctx.cid)
    }
}

impl fmt::Debug for FileNameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FileNameTemplate").field(&self.template).finish()
    }
}

/// Writes serialized reports into the configured output directory
pub struct ReportWriter<'a> {
    config: &'a ReporterConfig,
}

impl<'a> ReportWriter<'a> {
    pub fn new(config: &'a ReporterConfig) -> Self {
        Self { config }
    }

    /// File name for a context, from the configured format or the default pattern
    pub fn file_name(&self, capabilities: &str, cid: &str) -> Result<String, ReportError> {
        let name = match &self.config.output_file_format {
            Some(format) => format.file_name(&FileNameContext {
                capabilities,
                cid,
                config: self.config,
            }),
            None => default_file_name(capabilities, cid),
        };

        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(ReportError::InvalidFileName {
                cid: cid.to_string(),
                name,
            });
        }
        Ok(name)
    }

    /// Write the report and log the outcome.
    ///
    /// Failures are logged and returned; they never abort the caller's batch.
    pub fn write(&self, xml: &str, capabilities: &str, cid: &str) -> Result<PathBuf, ReportError> {
        let result = self.try_write(xml, capabilities, cid);
        match &result {
            Ok(path) => info!("Wrote JUnit report for {cid} to {}", path.display()),
            Err(e) if e.is_config() => warn!("{e}"),
            Err(e) => error!("Failed to write JUnit report for {cid}: {e}"),
        }
        result
    }

    /// Write the report without logging
    pub fn try_write(
        &self,
        xml: &str,
        capabilities: &str,
        cid: &str,
    ) -> Result<PathBuf, ReportError> {
        let output_dir = self
            .config
            .output_dir
            .as_deref()
            .ok_or_else(|| ReportError::MissingOutputDir {
                cid: cid.to_string(),
            })?;

        let file_name = self.file_name(capabilities, cid)?;

        let dir = absolute_dir(output_dir)?;
        fs::create_dir_all(&dir).map_err(|source| ReportError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = dir.join(file_name);
        fs::write(&path, xml).map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

        Ok(path)
    }
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, ReportError> {
    if dir.is_absolute() {
        return Ok(dir.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(ReportError::WorkingDir)?;
    Ok(cwd.join(dir))
}
