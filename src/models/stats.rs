//! Runner statistics tree
//!
//! Execution contexts → specs → suites → tests, as collected by the runner.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::OutputEvent;

/// Suite key prefix the runner uses for synthetic `before all` hook suites
pub const BEFORE_ALL_HOOK: &str = "\"before all\"";

/// Test key the runner records for hook artifacts without a real test
pub const HOOK_TEST_KEY: &str = "undefined";

/// Statistics for a whole run, keyed by context id (cid)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunnerStats {
    #[serde(alias = "runner")]
    pub runners: IndexMap<String, ExecutionContext>,
}

impl RunnerStats {
    /// Parse statistics from a JSON document
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Failed to parse runner statistics")
    }

    /// Load statistics from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read statistics file: {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Invalid statistics file: {}", path.display()))
    }

    /// Look up a single execution context
    pub fn context(&self, cid: &str) -> Option<&ExecutionContext> {
        self.runners.get(cid)
    }

    pub fn len(&self) -> usize {
        self.runners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runners.is_empty()
    }
}

/// One parallel run unit, bound to a single capability
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionContext {
    /// Human-readable environment label, already filesystem-safe
    pub sanitized_capabilities: String,

    /// Specs run in this context, keyed by spec id
    #[serde(default)]
    pub specs: IndexMap<String, Spec>,
}

impl ExecutionContext {
    pub fn new(sanitized_capabilities: impl Into<String>) -> Self {
        Self {
            sanitized_capabilities: sanitized_capabilities.into(),
            specs: IndexMap::new(),
        }
    }

    pub fn with_spec(mut self, spec_id: impl Into<String>, spec: Spec) -> Self {
        self.specs.insert(spec_id.into(), spec);
        self
    }
}

/// A source test file and its suites
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub files: Vec<String>,

    #[serde(default)]
    pub suites: IndexMap<String, Suite>,
}

impl Spec {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            files: vec![file.into()],
            suites: IndexMap::new(),
        }
    }

    pub fn with_suite(mut self, key: impl Into<String>, suite: Suite) -> Self {
        self.suites.insert(key.into(), suite);
        self
    }

    /// The file reported for this spec
    pub fn primary_file(&self) -> Option<&str> {
        self.files.first().map(String::as_str)
    }
}

/// A named grouping of tests with aggregate timing
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Suite {
    #[serde(default)]
    pub title: Option<String>,

    pub start: DateTime<Utc>,

    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,

    #[serde(default)]
    pub tests: IndexMap<String, Test>,
}

impl Suite {
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, duration: f64) -> Self {
        Self {
            title: Some(title.into()),
            start,
            duration,
            tests: IndexMap::new(),
        }
    }

    pub fn with_test(mut self, key: impl Into<String>, test: Test) -> Self {
        self.tests.insert(key.into(), test);
        self
    }

    /// Whether a suite key marks a synthetic `before all` hook
    pub fn is_before_all_hook(key: &str) -> bool {
        key.starts_with(BEFORE_ALL_HOOK)
    }
}

/// Test execution state as reported by the runner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestState {
    Passed,
    Failed,
    Pending,
    #[serde(other)]
    Unknown,
}

/// Error captured for a failed test
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TestError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub stack: Option<String>,
}

/// A single test and everything captured while it ran
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Test {
    #[serde(default)]
    pub title: Option<String>,

    /// Duration in milliseconds
    #[serde(default)]
    pub duration: f64,

    pub state: TestState,

    #[serde(default)]
    pub error: Option<TestError>,

    #[serde(default)]
    pub output: Vec<OutputEvent>,

    /// Paths of screenshots taken during the test
    #[serde(default)]
    pub screenshots: Vec<String>,
}

impl Test {
    pub fn new(title: impl Into<String>, state: TestState, duration: f64) -> Self {
        Self {
            title: Some(title.into()),
            duration,
            state,
            error: None,
            output: Vec::new(),
            screenshots: Vec::new(),
        }
    }

    pub fn untitled(state: TestState, duration: f64) -> Self {
        Self {
            title: None,
            ..Self::new("", state, duration)
        }
    }

    pub fn with_error(mut self, message: impl Into<String>, stack: Option<&str>) -> Self {
        self.error = Some(TestError {
            message: Some(message.into()),
            stack: stack.map(str::to_string),
        });
        self
    }

    pub fn with_output(mut self, event: OutputEvent) -> Self {
        self.output.push(event);
        self
    }

    pub fn with_screenshot(mut self, path: impl Into<String>) -> Self {
        self.screenshots.push(path.into());
        self
    }

    pub fn is_pending(&self) -> bool {
        self.state == TestState::Pending
    }

    /// Whether a test key is a hook artifact rather than a real test
    pub fn is_hook_key(key: &str) -> bool {
        key == HOOK_TEST_KEY
    }
}
