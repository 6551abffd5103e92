//! Discovery and ranking of the sessions that belong to a repository

use crate::config::Config;
use crate::error::SessionError;
use crate::identity::RepositoryIdentity;
use crate::session::Session;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SESSION_EXTENSION: &str = "jsonl";

/// How a session's recorded cwd is compared with the repository root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RootMatch {
    /// Literal string prefix: root `/a/b` also matches cwd `/a/bc`
    #[default]
    Prefix,
    /// Whole path components only: root `/a/b` matches `/a/b` and `/a/b/c`
    Segment,
}

impl RootMatch {
    pub fn contains(&self, root: &str, cwd: &str) -> bool {
        match self {
            RootMatch::Prefix => cwd.starts_with(root),
            RootMatch::Segment => Path::new(cwd).starts_with(Path::new(root)),
        }
    }
}

/// All `*.jsonl` regular files under `store_root`, in walk order
pub fn discover_session_files(store_root: &Path) -> Vec<PathBuf> {
    WalkDir::new(store_root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable store entry");
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some(SESSION_EXTENSION))
        .map(|e| e.into_path())
        .collect()
}

/// Whether `session` belongs to the repository described by `identity`
pub fn session_matches(
    session: &Session,
    identity: &RepositoryIdentity,
    root_match: RootMatch,
) -> bool {
    if let (Some(remote), Some(recorded)) = (&identity.remote_url, &session.repository_url)
        && recorded == remote
    {
        return true;
    }
    match (&identity.root_path, &session.cwd) {
        (Some(root), Some(cwd)) => root_match.contains(root, cwd),
        _ => false,
    }
}

/// Most recent first. A missing creation time sorts as the empty string.
pub fn sort_by_recency(sessions: &mut [Session]) {
    sessions.sort_by(|a, b| {
        let a_key = a.created_at.as_deref().unwrap_or("");
        let b_key = b.created_at.as_deref().unwrap_or("");
        b_key.cmp(a_key)
    });
}

/// Load every parseable session under the store, matching ones only,
/// ordered most recent first.
pub fn find_sessions(
    config: &Config,
    identity: &RepositoryIdentity,
) -> Result<Vec<Session>, SessionError> {
    if !config.store_root.exists() {
        return Err(SessionError::StoreNotFound(config.store_root.clone()));
    }
    if identity.is_empty() {
        return Err(SessionError::NotInRepository);
    }

    let mut sessions = Vec::new();
    for path in discover_session_files(&config.store_root) {
        let session = match Session::load(&path) {
            Ok(Some(session)) => session,
            Ok(None) => {
                tracing::debug!(path = %path.display(), "skipping log without session metadata");
                continue;
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unparseable log");
                continue;
            }
        };
        if session_matches(&session, identity, config.root_match) {
            sessions.push(session);
        }
    }

    if sessions.is_empty() {
        return Err(SessionError::NoMatchingSessions);
    }

    sort_by_recency(&mut sessions);
    tracing::debug!(count = sessions.len(), "matched sessions");
    Ok(sessions)
}
