//! JUnit report generation
//!
//! Builds, serializes and writes one JUnit XML report per execution context.

mod builder;
mod document;
mod format;
mod reporter;
mod sanitize;
mod writer;
mod xml;

pub use builder::ReportBuilder;
pub use document::{format_seconds, format_timestamp, JunitReport, Property, TestCase, TestSuite};
pub use format::{format_payload, standard_output, NoLimit, PayloadLimit, PayloadLimiter};
pub use reporter::{FinalizeSummary, JunitReporter};
pub use sanitize::{sanitize, SuiteNameFormat, DEFAULT_SUITE_NAME_FORMAT, MISSING_TITLE};
pub use writer::{default_file_name, FileNameContext, FileNameFormat, FileNameTemplate, ReportWriter};
pub use xml::{serialize_report, to_xml_string};
