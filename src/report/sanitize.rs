//! Suite and test name sanitization
//!
//! Turns free-form titles into identifier-safe tokens for JUnit names.

use regex::Regex;
use std::fmt;

use crate::error::ConfigError;

/// Placeholder used when a suite or test has no title
pub const MISSING_TITLE: &str = "skipped test";

/// Default split pattern: runs of anything that is not a lowercase letter or digit
pub const DEFAULT_SUITE_NAME_FORMAT: &str = "[^a-z0-9]+";

/// Split pattern applied to lower-cased titles
#[derive(Clone)]
pub struct SuiteNameFormat {
    pattern: Regex,
}

impl SuiteNameFormat {
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(pattern).map_err(|source| ConfigError::SuiteNameFormat {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn sanitize(&self, text: Option<&str>) -> String {
        sanitize(text, self)
    }
}

impl Default for SuiteNameFormat {
    fn default() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_SUITE_NAME_FORMAT).expect("default pattern is valid"),
        }
    }
}

impl fmt::Debug for SuiteNameFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SuiteNameFormat")
            .field(&self.pattern.as_str())
            .finish()
    }
}

impl PartialEq for SuiteNameFormat {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

/// Lower-case `text`, split it on `format` and join the non-empty pieces with `_`.
///
/// An absent title is replaced by [`MISSING_TITLE`] first, so the result is
/// never empty for a missing title.
pub fn sanitize(text: Option<&str>, format: &SuiteNameFormat) -> String {
    let lowered = text.unwrap_or(MISSING_TITLE).to_lowercase();
    format
        .pattern
        .split(&lowered)
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let format = SuiteNameFormat::default();
        assert_eq!(
            format.sanitize(Some("Some Special *** Spec Title")),
            "some_special_spec_title"
        );
        assert_eq!(format.sanitize(Some("some other foobar test")), "some_other_foobar_test");
        assert_eq!(format.sanitize(Some("  --leading and trailing--  ")), "leading_and_trailing");
    }

    #[test]
    fn test_custom_format() {
        let format = SuiteNameFormat::new("[^a-z0-9*]+").unwrap();
        assert_eq!(
            format.sanitize(Some("Some Special *** Spec Title")),
            "some_special_***_spec_title"
        );
    }

    #[test]
    fn test_missing_title() {
        let format = SuiteNameFormat::default();
        assert_eq!(format.sanitize(None), "skipped_test");
    }

    #[test]
    fn test_idempotent() {
        let format = SuiteNameFormat::default();
        for input in [
            "Some Special *** Spec Title",
            "that is a test",
            "Ünïcode & ümlauts",
            "__already_sanitized__",
            "",
        ] {
            let once = format.sanitize(Some(input));
            assert_eq!(format.sanitize(Some(once.as_str())), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_empty_title_is_empty() {
        let format = SuiteNameFormat::default();
        assert_eq!(format.sanitize(Some("***")), "");
    }

    #[test]
    fn test_invalid_pattern() {
        let err = SuiteNameFormat::new("[unclosed").unwrap_err();
        assert!(matches!(err, ConfigError::SuiteNameFormat { .. }));
    }
}
