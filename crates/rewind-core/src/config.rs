//! Configuration for session discovery and the external tools

use crate::context::DEFAULT_MAX_EVENTS;
use crate::exec::ExternalCommand;
use crate::index::RootMatch;
use rewind_store::Paths;
use std::path::PathBuf;
use std::time::Duration;

/// Shell command string for the external summarizer
pub const SUMMARIZER_CMD_ENV: &str = "CODEX_SUMMARIZER_CMD";

/// Summarizer timeout in seconds; `0` waits indefinitely
pub const SUMMARIZER_TIMEOUT_ENV: &str = "CODEX_SUMMARIZER_TIMEOUT";

pub const DEFAULT_SUMMARIZER_TIMEOUT: Duration = Duration::from_secs(120);

/// External tool that reopens a session interactively
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeTool {
    pub program: String,
    pub subcommand: String,
}

impl ResumeTool {
    pub fn new() -> Self {
        Self {
            program: "codex".to_string(),
            subcommand: "resume".to_string(),
        }
    }

    /// Command line shown to the user, e.g. `codex resume`
    pub fn display(&self) -> String {
        format!("{} {}", self.program, self.subcommand)
    }

    /// Invocation for one session. Interactive, so no timeout.
    pub fn command_for(&self, session_id: &str) -> ExternalCommand {
        ExternalCommand::new(&self.program)
            .arg(&self.subcommand)
            .arg(session_id)
    }
}

impl Default for ResumeTool {
    fn default() -> Self {
        Self::new()
    }
}

/// Session discovery configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the session-log store
    pub store_root: PathBuf,

    /// Directory of cached summaries
    pub cache_root: PathBuf,

    /// Max events fed to the summarizer
    pub max_context_events: usize,

    /// How a session cwd is compared with the repository root
    pub root_match: RootMatch,

    /// External summarizer, `None` when not configured
    pub summarizer: Option<ExternalCommand>,

    pub resume: ResumeTool,
}

impl Config {
    /// Defaults rooted at `paths`, with no summarizer
    pub fn new(paths: &Paths) -> Self {
        Self {
            store_root: paths.sessions_dir(),
            cache_root: paths.summaries_dir(),
            max_context_events: DEFAULT_MAX_EVENTS,
            root_match: RootMatch::default(),
            summarizer: None,
            resume: ResumeTool::new(),
        }
    }

    /// Defaults plus the summarizer settings from the environment
    pub fn from_env(paths: &Paths) -> Self {
        let command = std::env::var(SUMMARIZER_CMD_ENV).ok();
        let timeout = std::env::var(SUMMARIZER_TIMEOUT_ENV).ok();
        Self::new(paths).with_summarizer(command.as_deref(), timeout.as_deref())
    }

    /// Configure the summarizer from its raw command and timeout strings
    pub fn with_summarizer(mut self, command: Option<&str>, timeout: Option<&str>) -> Self {
        self.summarizer = summarizer_command(command, timeout);
        self
    }
}

fn summarizer_command(command: Option<&str>, timeout: Option<&str>) -> Option<ExternalCommand> {
    let command = command.map(str::trim).filter(|c| !c.is_empty())?;
    match ExternalCommand::parse(command) {
        Ok(cmd) => Some(cmd.with_timeout(parse_timeout(timeout))),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring {}", SUMMARIZER_CMD_ENV);
            None
        }
    }
}

fn parse_timeout(raw: Option<&str>) -> Option<Duration> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Some(DEFAULT_SUMMARIZER_TIMEOUT);
    };
    match raw.parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            tracing::warn!(value = raw, "invalid {}, using default", SUMMARIZER_TIMEOUT_ENV);
            Some(DEFAULT_SUMMARIZER_TIMEOUT)
        }
    }
}
