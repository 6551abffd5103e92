//! Session log loading

use crate::error::ParseError;
use crate::event::{Event, EventKind};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Single-line display limit for message excerpts, in characters
pub const MAX_MESSAGE_CHARS: usize = 200;

const ELLIPSIS: &str = "...";

/// One resumable session, backed by one append-only log file
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub session_id: String,
    pub created_at: Option<String>,
    pub ended_at: Option<String>,
    pub cwd: Option<String>,
    pub repository_url: Option<String>,
    pub branch: Option<String>,
    pub last_user_message: Option<String>,
    pub source_file: PathBuf,
    #[serde(skip)]
    pub events: Vec<Event>,
}

impl Session {
    /// Load a session log.
    ///
    /// Returns `Ok(None)` when the file has no `session_meta` record or the
    /// metadata carries no id. Any unreadable or malformed line fails the
    /// whole file.
    pub fn load(path: &Path) -> Result<Option<Self>, ParseError> {
        let records = rewind_store::read_jsonl_strict(path)?;
        let mut events = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if !record.is_object() {
                return Err(ParseError::NotAnObject { record: index + 1 });
            }
            events.push(Event::from_value(record));
        }
        Ok(Self::from_events(events, path.to_path_buf()))
    }

    /// Build a session from already parsed events (file order)
    pub fn from_events(events: Vec<Event>, source_file: PathBuf) -> Option<Self> {
        let meta = events.iter().find_map(Event::session_meta)?.clone();
        let session_id = meta.id.filter(|id| !id.is_empty())?;
        let created_at = meta.timestamp;

        let ended_at = match events.last() {
            Some(last) if last.has_timestamp_key() => last.timestamp.clone(),
            _ => created_at.clone(),
        };

        let last_user_message = events
            .iter()
            .rev()
            .find_map(|event| match &event.kind {
                EventKind::UserMessage { message } => Some(message.clone()),
                _ => None,
            })
            .flatten()
            .filter(|m| !m.is_empty())
            .map(|m| single_line_excerpt(&m));

        Some(Self {
            session_id,
            created_at,
            ended_at,
            cwd: meta.cwd,
            repository_url: meta.repository_url,
            branch: meta.branch,
            last_user_message,
            source_file,
            events,
        })
    }
}

/// Flatten newlines to spaces and cap at [`MAX_MESSAGE_CHARS`] characters,
/// replacing the tail with `...` when cut.
pub fn single_line_excerpt(text: &str) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= MAX_MESSAGE_CHARS {
        return flat;
    }
    let keep = MAX_MESSAGE_CHARS - ELLIPSIS.len();
    let mut excerpt: String = flat.chars().take(keep).collect();
    excerpt.push_str(ELLIPSIS);
    excerpt
}
