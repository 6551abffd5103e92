//! Path resolution for the assistant home

use std::path::{Path, PathBuf};

/// Environment variable that relocates the assistant home
pub const CODEX_HOME_ENV: &str = "CODEX_HOME";

/// Resolves standard paths under the assistant home (`~/.codex`)
#[derive(Debug, Clone)]
pub struct Paths {
    pub codex_home: PathBuf,
}

impl Paths {
    /// Resolve the assistant home from `CODEX_HOME`, falling back to `~/.codex`
    pub fn new() -> std::io::Result<Self> {
        if let Some(home) = std::env::var_os(CODEX_HOME_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(codex_home = ?home, "using {}", CODEX_HOME_ENV);
            return Ok(Self::from_home(PathBuf::from(home)));
        }

        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self::from_home(home.join(".codex")))
    }

    /// Use an explicit assistant home
    pub fn from_home(codex_home: impl Into<PathBuf>) -> Self {
        Self {
            codex_home: codex_home.into(),
        }
    }

    /// Root of the session-log store
    pub fn sessions_dir(&self) -> PathBuf {
        self.codex_home.join("sessions")
    }

    /// Directory holding one cached summary per session
    pub fn summaries_dir(&self) -> PathBuf {
        self.codex_home.join("session_summaries")
    }

    pub fn home(&self) -> &Path {
        &self.codex_home
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_from_home_layout() {
        let paths = Paths::from_home("/tmp/codex-home");
        assert_eq!(paths.home(), Path::new("/tmp/codex-home"));
        assert!(paths.sessions_dir().ends_with("codex-home/sessions"));
        assert!(paths.summaries_dir().ends_with("codex-home/session_summaries"));
    }

    #[test]
    #[serial]
    fn test_codex_home_env_override() {
        let original = std::env::var_os(CODEX_HOME_ENV);
        unsafe { std::env::set_var(CODEX_HOME_ENV, "/tmp/elsewhere") };

        let paths = Paths::new();

        match original {
            Some(v) => unsafe { std::env::set_var(CODEX_HOME_ENV, v) },
            None => unsafe { std::env::remove_var(CODEX_HOME_ENV) },
        }

        let paths = paths.unwrap();
        assert_eq!(paths.codex_home, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    #[serial]
    fn test_default_home_is_dot_codex() {
        let original = std::env::var_os(CODEX_HOME_ENV);
        unsafe { std::env::remove_var(CODEX_HOME_ENV) };

        let paths = Paths::new();

        if let Some(v) = original {
            unsafe { std::env::set_var(CODEX_HOME_ENV, v) };
        }

        let paths = paths.unwrap();
        assert!(paths.codex_home.ends_with(".codex"));
    }
}
