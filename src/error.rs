//! Error types for configuration and report emission

use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Invalid reporter configuration, detected when the configuration is built
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid suite name format {pattern:?}: {source}")]
    SuiteNameFormat {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid output file format {template:?}: {reason}")]
    OutputFileFormat { template: String, reason: String },
}

/// Failure to produce or persist the report of one execution context
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("No output directory configured, report for {cid} not written")]
    MissingOutputDir { cid: String },

    #[error("Invalid report file name {name:?} for {cid}")]
    InvalidFileName { cid: String, name: String },

    #[error("Cannot resolve working directory: {0}")]
    WorkingDir(#[source] io::Error),

    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("XML serialization failed: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Serialized report is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl ReportError {
    /// Configuration omissions, as opposed to I/O or serialization failures
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ReportError::MissingOutputDir { .. } | ReportError::InvalidFileName { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReportError::MissingOutputDir {
            cid: "0-0".to_string(),
        };
        assert!(err.to_string().contains("0-0"));
        assert!(err.is_config());

        let err = ReportError::Write {
            path: PathBuf::from("/tmp/out.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/tmp/out.xml"));
        assert!(!err.is_config());
    }
}
