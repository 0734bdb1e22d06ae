//! Report building
//!
//! Maps one execution context of the statistics tree onto a [`JunitReport`].

use std::path::{Path, PathBuf};
use tracing::debug;

use super::document::{JunitReport, TestCase, TestSuite};
use super::format::{standard_output, PayloadLimiter};
use crate::config::ReporterConfig;
use crate::models::{ExecutionContext, Spec, Suite, Test};

/// Builds the report document for a single execution context
pub struct ReportBuilder<'a> {
    config: &'a ReporterConfig,
    limiter: &'a dyn PayloadLimiter,
    base_dir: PathBuf,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(config: &'a ReporterConfig, limiter: &'a dyn PayloadLimiter) -> Self {
        let base_dir = config
            .base_dir
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();

        Self {
            config,
            limiter,
            base_dir,
        }
    }

    /// Label used as the package part of every `classname`
    pub fn package_label(&self, context: &ExecutionContext) -> String {
        match &self.config.package_name {
            Some(package) => format!("{}-{package}", context.sanitized_capabilities),
            None => context.sanitized_capabilities.clone(),
        }
    }

    pub fn build(&self, context: &ExecutionContext) -> JunitReport {
        let package_label = self.package_label(context);
        let mut report = JunitReport::default();

        for (spec_id, spec) in &context.specs {
            for (suite_key, suite) in &spec.suites {
                if Suite::is_before_all_hook(suite_key) {
                    debug!("Skipping hook suite {suite_key:?} in spec {spec_id}");
                    continue;
                }

                let testsuite = self.build_suite(spec_id, spec, suite, context, &package_label);
                report.testsuites.push(testsuite);
            }
        }

        report
    }

    fn build_suite(
        &self,
        spec_id: &str,
        spec: &Spec,
        suite: &Suite,
        context: &ExecutionContext,
        package_label: &str,
    ) -> TestSuite {
        let suite_name = self.config.suite_name_format.sanitize(suite.title.as_deref());

        let mut testsuite = TestSuite::new(suite_name.as_str(), suite.start, suite.duration);
        testsuite.add_property("specId", spec_id);
        testsuite.add_property("suiteName", suite.title.as_deref().unwrap_or_default());
        testsuite.add_property("capabilities", context.sanitized_capabilities.as_str());
        if let Some(file) = spec.primary_file() {
            testsuite.add_property("file", relative_file(file, &self.base_dir));
        }

        let classname = format!("{package_label}.{suite_name}");
        for (test_key, test) in &suite.tests {
            if Test::is_hook_key(test_key) {
                continue;
            }
            testsuite.testcases.push(self.build_case(&classname, test));
        }

        testsuite
    }

    fn build_case(&self, classname: &str, test: &Test) -> TestCase {
        let name = self.config.suite_name_format.sanitize(test.title.as_deref());
        let mut testcase = TestCase::new(classname, name, test.duration);

        if test.is_pending() {
            testcase.skipped = true;
        }

        if let Some(error) = &test.error {
            testcase.error = Some(error.message.clone().unwrap_or_default());
            if let Some(stack) = &error.stack {
                testcase.system_err = Some(format!("\n{stack}\n"));
            }
        }

        let output = standard_output(test, self.limiter, self.config.write_standard_output);
        if !output.is_empty() {
            testcase.system_out = Some(format!("\n{output}\n"));
        }

        testcase
    }
}

/// Strip `base` from `file` so reports carry paths relative to the project
fn relative_file(file: &str, base: &Path) -> String {
    if base.as_os_str().is_empty() {
        return file.to_string();
    }
    match Path::new(file).strip_prefix(base) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => file.to_string(),
    }
}
