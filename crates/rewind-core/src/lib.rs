//! Session discovery: log parsing, repository matching and context extraction

mod config;
mod context;
mod error;
mod event;
mod exec;
mod identity;
mod index;
mod locale;
mod session;
mod time;

pub use config::{
    Config, ResumeTool, DEFAULT_SUMMARIZER_TIMEOUT, SUMMARIZER_CMD_ENV, SUMMARIZER_TIMEOUT_ENV,
};
pub use context::{build_context, DEFAULT_MAX_EVENTS, NO_EVENTS_SENTINEL};
pub use error::{ParseError, SessionError};
pub use event::{Event, EventKind, SessionMeta};
pub use exec::{split_command_line, CommandError, CommandOutput, ExternalCommand};
pub use identity::RepositoryIdentity;
pub use index::{
    discover_session_files, find_sessions, session_matches,
    sort_by_recency, RootMatch,
};
pub use locale::{Locale, Messages};
pub use session::{single_line_excerpt, Session, MAX_MESSAGE_CHARS};
pub use time::format_local;
