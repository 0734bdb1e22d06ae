//! JUnit report document model
//!
//! An in-memory representation of the XML document, produced by the builder and
//! consumed by the serializer.

use chrono::{DateTime, Utc};

/// A full report: every suite of one execution context
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JunitReport {
    pub testsuites: Vec<TestSuite>,
}

impl JunitReport {
    pub fn testcase_count(&self) -> usize {
        self.testsuites.iter().map(|suite| suite.testcases.len()).sum()
    }

    pub fn find_suite(&self, name: &str) -> Option<&TestSuite> {
        self.testsuites.iter().find(|suite| suite.name == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestSuite {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: f64,
    pub properties: Vec<Property>,
    pub testcases: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: impl Into<String>, timestamp: DateTime<Utc>, duration_ms: f64) -> Self {
        Self {
            name: name.into(),
            timestamp,
            duration_ms,
            properties: Vec::new(),
            testcases: Vec::new(),
        }
    }

    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.properties.push(Property {
            name: name.into(),
            value: value.into(),
        });
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }

    pub fn tests(&self) -> usize {
        self.testcases.len()
    }

    pub fn errors(&self) -> usize {
        self.testcases.iter().filter(|t| t.error.is_some()).count()
    }

    /// Always zero: failed tests are reported through `<error>` elements
    pub fn failures(&self) -> usize {
        0
    }

    pub fn skipped(&self) -> usize {
        self.testcases.iter().filter(|t| t.skipped).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestCase {
    pub classname: String,
    pub name: String,
    /// Duration in milliseconds
    pub duration_ms: f64,
    pub skipped: bool,
    /// Message of the `<error>` element, if the test errored
    pub error: Option<String>,
    pub system_out: Option<String>,
    pub system_err: Option<String>,
}

impl TestCase {
    pub fn new(classname: impl Into<String>, name: impl Into<String>, duration_ms: f64) -> Self {
        Self {
            classname: classname.into(),
            name: name.into(),
            duration_ms,
            skipped: false,
            error: None,
            system_out: None,
            system_err: None,
        }
    }
}

/// Milliseconds as seconds, printed without a trailing `.0`
pub fn format_seconds(duration_ms: f64) -> String {
    format!("{}", duration_ms / 1000.0)
}

/// Timestamp in the `YYYY-MM-DDTHH:MM:SS` form JUnit consumers expect
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H:%M:%S").to_string()
}
