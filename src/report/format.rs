//! Standard output formatting for captured commands and results
//!
//! Captured payloads can be arbitrarily large (screenshots, page sources), so every
//! payload goes through a [`PayloadLimiter`] before it is embedded in a report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{OutputEvent, Test};

/// Bounds the size of a captured payload before it is written into a report
pub trait PayloadLimiter: Send + Sync {
    fn limit(&self, value: &Value) -> Value;
}

impl<F> PayloadLimiter for F
where
    F: Fn(&Value) -> Value + Send + Sync,
{
    fn limit(&self, value: &Value) -> Value {
        self(value)
    }
}

/// Embeds payloads unchanged
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLimit;

impl PayloadLimiter for NoLimit {
    fn limit(&self, value: &Value) -> Value {
        value.clone()
    }
}

/// Truncates long strings and arrays, recursively
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadLimit {
    /// Maximum characters kept from a string
    #[serde(default = "default_max_string_len")]
    pub max_string_len: usize,

    /// Maximum items kept from an array
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
}

fn default_max_string_len() -> usize {
    1000
}

fn default_max_array_len() -> usize {
    10
}

/// Strings at least this long that look like base64 are replaced by their size
const BASE64_MIN_LEN: usize = 100;

impl Default for PayloadLimit {
    fn default() -> Self {
        Self {
            max_string_len: default_max_string_len(),
            max_array_len: default_max_array_len(),
        }
    }
}

impl PayloadLimit {
    fn limit_str(&self, s: &str) -> String {
        let len = s.chars().count();
        if len > BASE64_MIN_LEN && is_base64(s) {
            return format!("[base64] {} bytes", s.len());
        }
        if len > self.max_string_len {
            let kept: String = s.chars().take(self.max_string_len).collect();
            return format!("{kept} ... ({} more bytes)", s.len() - kept.len());
        }
        s.to_string()
    }
}

impl PayloadLimiter for PayloadLimit {
    fn limit(&self, value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(self.limit_str(s)),
            Value::Array(items) => {
                let mut limited: Vec<Value> = items
                    .iter()
                    .take(self.max_array_len)
                    .map(|item| self.limit(item))
                    .collect();
                if items.len() > self.max_array_len {
                    limited.push(Value::String(format!(
                        "({} more items)",
                        items.len() - self.max_array_len
                    )));
                }
                Value::Array(limited)
            }
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.limit(value)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

fn is_base64(s: &str) -> bool {
    s.len() % 4 == 0
        && s.trim_end_matches('=').len() + 2 >= s.len()
        && s.trim_end_matches('=')
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'+' || b == b'/')
}

/// Compact JSON of the limited payload
pub fn format_payload(value: &Value, limiter: &dyn PayloadLimiter) -> String {
    limiter.limit(value).to_string()
}

/// Render the captured output of a test, one line per reported event.
///
/// Returns an empty string when nothing is worth reporting or when standard
/// output is disabled.
pub fn standard_output(test: &Test, limiter: &dyn PayloadLimiter, enabled: bool) -> String {
    if !enabled {
        return String::new();
    }

    let mut lines: Vec<String> = Vec::new();
    for event in &test.output {
        match event {
            OutputEvent::Command(cmd) => lines.push(format!(
                "COMMAND: {} {} - {}",
                cmd.method.to_uppercase(),
                cmd.uri.href(),
                format_payload(&cmd.data, limiter)
            )),
            OutputEvent::Result(result) => {
                lines.push(format!("RESULT: {}", format_payload(&result.body, limiter)))
            }
            OutputEvent::Other { .. } => {}
        }
    }

    for path in &test.screenshots {
        lines.push(format!("[[ATTACHMENT|{path}]]"));
    }

    lines.join("\n")
}
