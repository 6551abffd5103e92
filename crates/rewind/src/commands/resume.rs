use rewind_core::{Config, Locale, RepositoryIdentity, Session, find_sessions, format_local};
use std::io::Write;
use std::process::ExitStatus;

/// What happened when the resume tool was launched
#[derive(Debug)]
pub enum ResumeOutcome {
    Exited(ExitStatus),
    ToolMissing,
    Failed(String),
}

pub fn run(config: &Config, locale: Locale) -> anyhow::Result<()> {
    let identity = RepositoryIdentity::resolve(&std::env::current_dir()?);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let (session, outcome) = resume_last(config, &identity, locale, &mut out)?;
    match outcome {
        ResumeOutcome::Exited(status) => {
            tracing::debug!(session_id = %session.session_id, code = ?status.code(), "resume tool finished");
        }
        ResumeOutcome::ToolMissing => {}
        ResumeOutcome::Failed(reason) => {
            tracing::debug!(session_id = %session.session_id, %reason, "resume tool did not start");
        }
    }
    Ok(())
}

/// Resume the most recent session of the repository
pub fn resume_last(
    config: &Config,
    identity: &RepositoryIdentity,
    locale: Locale,
    out: &mut dyn Write,
) -> anyhow::Result<(Session, ResumeOutcome)> {
    let sessions = find_sessions(config, identity)?;
    launch_latest(config, sessions, locale, out)
}

fn launch_latest(
    config: &Config,
    sessions: Vec<Session>,
    locale: Locale,
    out: &mut dyn Write,
) -> anyhow::Result<(Session, ResumeOutcome)> {
    let t = locale.messages();
    let last = sessions
        .into_iter()
        .next()
        .ok_or(rewind_core::SessionError::NoMatchingSessions)?;

    writeln!(
        out,
        "{} {} → {}",
        t.resuming,
        format_local(last.created_at.as_deref()),
        format_local(last.ended_at.as_deref()),
    )?;
    writeln!(out, "  {} {}", config.resume.display(), last.session_id)?;
    writeln!(out)?;
    out.flush()?;

    let command = config.resume.command_for(&last.session_id);
    let outcome = match command.run_interactive() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!(program = %command.program, code = ?status.code(), "resume tool exited with failure");
            }
            ResumeOutcome::Exited(status)
        }
        Err(e) if e.is_not_found() => {
            writeln!(out, "{}", t.resume_tool_missing(&command.program))?;
            ResumeOutcome::ToolMissing
        }
        Err(e) => {
            writeln!(out, "{} {}", t.resume_failed(&command.program), e)?;
            ResumeOutcome::Failed(e.to_string())
        }
    };

    Ok((last, outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewind_core::{ResumeTool, SessionError};
    use rewind_store::Paths;
    use std::path::Path;
    use tempfile::TempDir;

    const REMOTE: &str = "https://example/repo.git";

    fn write_session(store: &Path, id: &str, created: &str) {
        let meta = serde_json::json!({"type": "session_meta", "timestamp": created, "payload": {
            "id": id, "timestamp": created, "git": {"repository_url": REMOTE}}});
        std::fs::create_dir_all(store).unwrap();
        std::fs::write(store.join(format!("{}.jsonl", id)), format!("{}\n", meta)).unwrap();
    }

    fn identity() -> RepositoryIdentity {
        RepositoryIdentity::new(Some(REMOTE.to_string()), None)
    }

    #[cfg(unix)]
    #[test]
    fn test_resume_launches_tool_with_latest_session_id() {
        let home = TempDir::new().unwrap();
        let mut config = Config::new(&Paths::from_home(home.path()));
        write_session(&config.store_root, "older", "2025-01-01T00:00:00Z");
        write_session(&config.store_root, "latest", "2025-03-01T00:00:00Z");

        let record = home.path().join("invoked");
        let script = home.path().join("fake-codex.sh");
        std::fs::write(&script, format!("printf '%s' \"$*\" > '{}'\n", record.display())).unwrap();
        config.resume = ResumeTool {
            program: "sh".to_string(),
            subcommand: script.display().to_string(),
        };

        let mut out = Vec::new();
        let (session, outcome) = resume_last(&config, &identity(), Locale::En, &mut out).unwrap();

        assert_eq!(session.session_id, "latest");
        assert!(matches!(outcome, ResumeOutcome::Exited(status) if status.success()));
        assert_eq!(std::fs::read_to_string(&record).unwrap(), "latest");

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Resuming last session: "));
        assert!(text.contains(&format!("  sh {} latest\n", script.display())));
    }

    #[test]
    fn test_resume_reports_missing_tool() {
        let home = TempDir::new().unwrap();
        let mut config = Config::new(&Paths::from_home(home.path()));
        write_session(&config.store_root, "only", "2025-03-01T00:00:00Z");
        config.resume.program = "no-such-codex-binary-rewind".to_string();

        let mut out = Vec::new();
        let (session, outcome) = resume_last(&config, &identity(), Locale::En, &mut out).unwrap();

        assert_eq!(session.session_id, "only");
        assert!(matches!(outcome, ResumeOutcome::ToolMissing));
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Could not find the 'no-such-codex-binary-rewind' command in PATH."));
        assert!(text.contains("  no-such-codex-binary-rewind resume only\n"));
    }

    #[test]
    fn test_resume_outside_repository() {
        let home = TempDir::new().unwrap();
        let config = Config::new(&Paths::from_home(home.path()));
        std::fs::create_dir_all(&config.store_root).unwrap();

        let mut out = Vec::new();
        let err = resume_last(&config, &RepositoryIdentity::default(), Locale::Es, &mut out)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::NotInRepository)
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_resume_without_store() {
        let home = TempDir::new().unwrap();
        let config = Config::new(&Paths::from_home(home.path()));

        let mut out = Vec::new();
        let err = resume_last(&config, &identity(), Locale::En, &mut out).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SessionError>(),
            Some(SessionError::StoreNotFound(_))
        ));
    }
}
