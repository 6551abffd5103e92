use crate::summarizer::Summarize;
use rewind_core::{build_context, Locale, Session};
use std::path::{Path, PathBuf};

const SUMMARY_EXTENSION: &str = "txt";

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to access summary cache at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One plain-text summary file per session id
pub struct SummaryCache {
    root: PathBuf,
    max_context_events: usize,
}

impl SummaryCache {
    pub fn new(root: impl Into<PathBuf>, max_context_events: usize) -> Self {
        Self {
            root: root.into(),
            max_context_events,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Summary file for `session_id`, or `None` when the id cannot name a
    /// single file directly under the cache root.
    pub fn path_for(&self, session_id: &str) -> Option<PathBuf> {
        if !is_plain_file_name(session_id) {
            return None;
        }
        Some(self.root.join(format!("{}.{}", session_id, SUMMARY_EXTENSION)))
    }

    /// Cached summary if one was stored, trimmed
    pub fn get(&self, session_id: &str) -> Result<Option<String>, CacheError> {
        let Some(path) = self.path_for(session_id) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Some(contents.trim().to_string()))
    }

    /// Return the stored summary, or compute, store and return a fresh one.
    ///
    /// Only non-empty summaries are stored, so a failed or unavailable
    /// summarizer is retried on the next call. An empty string means no
    /// summary is available.
    pub fn get_or_create(
        &self,
        session: &Session,
        locale: Locale,
        summarizer: &dyn Summarize,
    ) -> Result<String, CacheError> {
        std::fs::create_dir_all(&self.root).map_err(|source| CacheError::Io {
            path: self.root.clone(),
            source,
        })?;

        if let Some(summary) = self.get(&session.session_id)? {
            return Ok(summary);
        }

        let context = build_context(&session.events, self.max_context_events);
        let summary = summarizer
            .summarize(&context, locale)
            .map(|s| s.trim().to_string())
            .unwrap_or_default();

        if summary.is_empty() {
            return Ok(summary);
        }
        match self.path_for(&session.session_id) {
            Some(path) => {
                if let Err(e) = rewind_store::atomic_write(&path, summary.as_bytes()) {
                    tracing::warn!(path = %path.display(), error = %e, "failed to cache summary");
                } else {
                    tracing::debug!(session_id = %session.session_id, "cached new summary");
                }
            }
            None => {
                tracing::warn!(session_id = %session.session_id, "session id is not a plain file name, summary not cached");
            }
        }
        Ok(summary)
    }
}

fn is_plain_file_name(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
        && Path::new(id).components().count() == 1
}
