//! Repository identity of the invoking working directory

use std::path::Path;
use std::process::Command;

/// Remote URL and/or top-level path of the current git repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryIdentity {
    pub remote_url: Option<String>,
    pub root_path: Option<String>,
}

impl RepositoryIdentity {
    pub fn new(remote_url: Option<String>, root_path: Option<String>) -> Self {
        Self {
            remote_url: remote_url.filter(|s| !s.is_empty()),
            root_path: root_path.filter(|s| !s.is_empty()),
        }
    }

    /// Query git from `workdir`. Each lookup is best-effort on its own.
    pub fn resolve(workdir: &Path) -> Self {
        let identity = Self::new(
            git_output(workdir, &["config", "--get", "remote.origin.url"]),
            git_output(workdir, &["rev-parse", "--show-toplevel"]),
        );
        tracing::debug!(
            remote_url = ?identity.remote_url,
            root_path = ?identity.root_path,
            "resolved repository identity"
        );
        identity
    }

    /// Neither a remote nor a root could be found
    pub fn is_empty(&self) -> bool {
        self.remote_url.is_none() && self.root_path.is_none()
    }

    /// Label for headers: the remote if known, otherwise the root path
    pub fn label(&self) -> &str {
        self.remote_url
            .as_deref()
            .or(self.root_path.as_deref())
            .unwrap_or("?")
    }
}

fn git_output(workdir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(workdir)
        .output()
        .ok()?;

    if output.status.success() {
        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!value.is_empty()).then_some(value)
    } else {
        None
    }
}
