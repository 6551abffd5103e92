//! Bounded transcript of a session for summarization

use crate::event::{Event, EventKind};
use crate::session::single_line_excerpt;

pub const DEFAULT_MAX_EVENTS: usize = 40;

/// Returned instead of an empty transcript; empty means "not computed"
pub const NO_EVENTS_SENTINEL: &str = "No user/assistant events found in this session.";

/// Render the most recent `max_events` user, tool and assistant events,
/// oldest first, one tagged line per event.
pub fn build_context(events: &[Event], max_events: usize) -> String {
    let mut lines: Vec<String> = Vec::new();

    for event in events.iter().rev() {
        if lines.len() >= max_events {
            break;
        }
        let ts = event.timestamp.as_deref().unwrap_or("");
        let line = match &event.kind {
            EventKind::UserMessage { message } => {
                // User text goes to the summarizer verbatim, newlines included.
                format!("[USER @ {}] {}", ts, message.as_deref().unwrap_or(""))
            }
            EventKind::ToolCall { tool_name } => {
                format!(
                    "[TOOL @ {}] tool call: {}",
                    ts,
                    tool_name.as_deref().unwrap_or("tool")
                )
            }
            EventKind::AssistantMessage { message } => match message.as_deref() {
                Some(msg) if !msg.is_empty() => {
                    format!("[ASSISTANT @ {}] {}", ts, single_line_excerpt(msg))
                }
                _ => continue,
            },
            EventKind::SessionMeta(_) | EventKind::Other => continue,
        };
        lines.push(line);
    }

    if lines.is_empty() {
        return NO_EVENTS_SENTINEL.to_string();
    }
    lines.reverse();
    lines.join("\n")
}
