//! Output events captured while a test ran

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A WebDriver command or its result, captured in test order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutputEvent", into = "RawOutputEvent")]
pub enum OutputEvent {
    Command(CommandPayload),
    Result(ResultPayload),
    /// Any other event type; kept so the input round-trips, never reported
    Other { kind: String, payload: Value },
}

impl OutputEvent {
    pub fn command(method: impl Into<String>, uri: impl Into<String>, data: Value) -> Self {
        OutputEvent::Command(CommandPayload {
            method: method.into(),
            uri: RequestUri::Href(uri.into()),
            data,
        })
    }

    pub fn result(body: Value) -> Self {
        OutputEvent::Result(ResultPayload { body })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    pub method: String,
    pub uri: RequestUri,
    #[serde(default)]
    pub data: Value,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub body: Value,
}

/// Request URI, either a plain string or a parsed URL object
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestUri {
    Href(String),
    Parsed { href: String },
}

impl RequestUri {
    pub fn href(&self) -> &str {
        match self {
            RequestUri::Href(href) | RequestUri::Parsed { href } => href,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RawOutputEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Value,
}

impl TryFrom<RawOutputEvent> for OutputEvent {
    type Error = serde_json::Error;

    fn try_from(raw: RawOutputEvent) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "command" => serde_json::from_value(raw.payload).map(OutputEvent::Command),
            "result" => serde_json::from_value(raw.payload).map(OutputEvent::Result),
            _ => Ok(OutputEvent::Other {
                kind: raw.kind,
                payload: raw.payload,
            }),
        }
    }
}

impl From<OutputEvent> for RawOutputEvent {
    fn from(event: OutputEvent) -> Self {
        match event {
            OutputEvent::Command(payload) => RawOutputEvent {
                kind: "command".to_string(),
                payload: serde_json::to_value(payload).unwrap_or_default(),
            },
            OutputEvent::Result(payload) => RawOutputEvent {
                kind: "result".to_string(),
                payload: serde_json::to_value(payload).unwrap_or_default(),
            },
            OutputEvent::Other { kind, payload } => RawOutputEvent { kind, payload },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_command() {
        let event: OutputEvent = serde_json::from_value(json!({
            "type": "command",
            "payload": {"method": "post", "uri": "/session/1/url", "data": {"url": "http://x"}}
        }))
        .unwrap();

        match event {
            OutputEvent::Command(cmd) => {
                assert_eq!(cmd.method, "post");
                assert_eq!(cmd.uri.href(), "/session/1/url");
                assert_eq!(cmd.data, json!({"url": "http://x"}));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_parsed_uri() {
        let event: OutputEvent = serde_json::from_value(json!({
            "type": "command",
            "payload": {"method": "GET", "uri": {"href": "http://localhost:4444/wd/hub/status"}}
        }))
        .unwrap();

        match event {
            OutputEvent::Command(cmd) => {
                assert_eq!(cmd.uri.href(), "http://localhost:4444/wd/hub/status");
                assert_eq!(cmd.data, Value::Null);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_parse_result_and_other() {
        let events: Vec<OutputEvent> = serde_json::from_value(json!([
            {"type": "result", "payload": {"body": {"value": 42}}},
            {"type": "screenshot", "payload": {"filename": "a.png"}}
        ]))
        .unwrap();

        assert_eq!(events[0], OutputEvent::result(json!({"value": 42})));
        assert!(matches!(&events[1], OutputEvent::Other { kind, .. } if kind == "screenshot"));
    }

    #[test]
    fn test_malformed_command_is_rejected() {
        let result: Result<OutputEvent, _> =
            serde_json::from_value(json!({"type": "command", "payload": {"uri": "/x"}}));
        assert!(result.is_err());
    }
}
