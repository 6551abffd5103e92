//! Typed view over session-log records

use serde_json::Value;

pub const SESSION_META: &str = "session_meta";
pub const EVENT_MSG: &str = "event_msg";

/// Metadata carried by a `session_meta` record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMeta {
    pub id: Option<String>,
    pub timestamp: Option<String>,
    pub cwd: Option<String>,
    pub repository_url: Option<String>,
    pub branch: Option<String>,
}

/// Interpretation of a record's `type` (and `payload.type` for `event_msg`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    SessionMeta(SessionMeta),
    UserMessage { message: Option<String> },
    AssistantMessage { message: Option<String> },
    ToolCall { tool_name: Option<String> },
    /// Any record type the context builder does not interpret
    Other,
}

/// One record of a session log, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub timestamp: Option<String>,
    pub kind: EventKind,
    pub raw: Value,
}

impl Event {
    /// Classify a raw record. Absent or non-string fields become `None`.
    pub fn from_value(raw: Value) -> Self {
        let timestamp = str_at(&raw, &["timestamp"]);
        let payload = raw.get("payload").unwrap_or(&Value::Null);

        let kind = match raw.get("type").and_then(Value::as_str) {
            Some(SESSION_META) => EventKind::SessionMeta(SessionMeta {
                id: str_at(payload, &["id"]),
                timestamp: str_at(payload, &["timestamp"]),
                cwd: str_at(payload, &["cwd"]),
                repository_url: str_at(payload, &["git", "repository_url"]),
                branch: str_at(payload, &["git", "branch"]),
            }),
            Some(EVENT_MSG) => match payload.get("type").and_then(Value::as_str) {
                Some("user_message") => EventKind::UserMessage {
                    message: str_at(payload, &["message"]),
                },
                Some("assistant_message") => EventKind::AssistantMessage {
                    message: str_at(payload, &["message"]),
                },
                Some("tool_call") => EventKind::ToolCall {
                    tool_name: str_at(payload, &["tool_name"]),
                },
                _ => EventKind::Other,
            },
            _ => EventKind::Other,
        };

        Self {
            timestamp,
            kind,
            raw,
        }
    }

    /// Whether the record carries a top-level `timestamp` key at all
    pub fn has_timestamp_key(&self) -> bool {
        self.raw.get("timestamp").is_some()
    }

    pub fn session_meta(&self) -> Option<&SessionMeta> {
        match &self.kind {
            EventKind::SessionMeta(meta) => Some(meta),
            _ => None,
        }
    }
}

fn str_at(value: &Value, path: &[&str]) -> Option<String> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    current.as_str().map(str::to_string)
}
