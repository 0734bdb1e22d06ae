//! JUnit reporter - converts test runner statistics into JUnit XML reports
//!
//! At the end of a run the test runner hands over its statistics: one execution
//! context per capability (browser/platform), each holding specs, suites and
//! tests. This crate writes one JUnit XML file per execution context.
//!
//! ## Usage
//!
//! ```no_run
//! use junit_reporter::{JunitReporter, ReporterConfig, RunnerStats};
//!
//! let stats = RunnerStats::load("stats.json")?;
//! let config = ReporterConfig::default()
//!     .with_output_dir("./reports")
//!     .with_package_name("nightly");
//!
//! let summary = JunitReporter::new(config).finalize(&stats, || println!("done"));
//! assert!(summary.is_success());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

pub use config::{ReporterConfig, ReporterOptions};
pub use error::{ConfigError, ReportError};
pub use models::{ExecutionContext, RunnerStats};
pub use report::{FileNameContext, FileNameFormat, FinalizeSummary, JunitReporter, SuiteNameFormat};
