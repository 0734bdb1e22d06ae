//! JUnit reporter
//!
//! Runs the end-of-run pass: one report per execution context, then the epilogue.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info};

use super::builder::ReportBuilder;
use super::format::{PayloadLimit, PayloadLimiter};
use super::writer::ReportWriter;
use super::xml::to_xml_string;
use crate::config::{ReporterConfig, ReporterOptions};
use crate::error::{ConfigError, ReportError};
use crate::models::{ExecutionContext, RunnerStats};

/// Outcome of a finalize pass
#[derive(Debug, Default)]
pub struct FinalizeSummary {
    /// Report files written, in context order
    pub written: Vec<PathBuf>,
    /// Contexts whose report could not be produced or written
    pub failed: Vec<(String, ReportError)>,
}

impl FinalizeSummary {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Converts runner statistics into JUnit XML files
pub struct JunitReporter {
    config: ReporterConfig,
    limiter: Arc<dyn PayloadLimiter>,
}

impl JunitReporter {
    pub fn new(config: ReporterConfig) -> Self {
        Self {
            config,
            limiter: Arc::new(PayloadLimit::default()),
        }
    }

    /// Build a reporter from file options, validating them
    pub fn from_options(options: &ReporterOptions) -> Result<Self, ConfigError> {
        let config = options.into_config()?;
        Ok(Self::new(config).with_limiter(options.payload_limit))
    }

    /// Replace the payload limiter used for captured commands and results
    pub fn with_limiter(mut self, limiter: impl PayloadLimiter + 'static) -> Self {
        self.limiter = Arc::new(limiter);
        self
    }

    pub fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Build and serialize the report of one context without writing it
    pub fn render(&self, context: &ExecutionContext) -> Result<String, ReportError> {
        let report = ReportBuilder::new(&self.config, self.limiter.as_ref()).build(context);
        debug!(
            "Built report with {} suites and {} tests for {}",
            report.testsuites.len(),
            report.testcase_count(),
            context.sanitized_capabilities
        );
        to_xml_string(&report)
    }

    /// Write one report per execution context, then call `epilogue`.
    ///
    /// A failing context is logged and recorded; the remaining contexts are still
    /// written and the epilogue always runs.
    pub fn finalize<F: FnOnce()>(&self, stats: &RunnerStats, epilogue: F) -> FinalizeSummary {
        let writer = ReportWriter::new(&self.config);
        let mut summary = FinalizeSummary::default();

        for (cid, context) in &stats.runners {
            let result = self
                .render(context)
                .inspect_err(|e| error!("Failed to build JUnit report for {cid}: {e}"))
                .and_then(|xml| writer.write(&xml, &context.sanitized_capabilities, cid));

            match result {
                Ok(path) => summary.written.push(path),
                Err(e) => summary.failed.push((cid.clone(), e)),
            }
        }

        if let Some(dir) = &self.config.output_dir {
            info!(
                "Wrote {} of {} JUnit reports to {}",
                summary.written.len(),
                summary.total(),
                dir.display()
            );
        }

        epilogue();
        summary
    }
}
