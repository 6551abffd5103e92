//! Typed invocation of external tools

use std::io::{Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid command line: {0}")]
    Parse(String),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to external command: {0}")]
    Io(#[from] std::io::Error),

    #[error("external command timed out after {0:?}")]
    TimedOut(Duration),
}

impl CommandError {
    /// The executable could not be found on `PATH`
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CommandError::Spawn { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }
}

/// Captured result of a non-interactive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Program plus argument vector, with an optional bound on how long a
/// captured run may take. `timeout: None` waits indefinitely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    pub program: String,
    pub args: Vec<String>,
    pub timeout: Option<Duration>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Parse a shell-style command string into program and arguments
    pub fn parse(command_line: &str) -> Result<Self, CommandError> {
        let mut words = split_command_line(command_line)?.into_iter();
        let program = words
            .next()
            .ok_or_else(|| CommandError::Parse("empty command".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
            timeout: None,
        })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }

    /// Run with `input` on stdin and capture stdout, honouring the timeout.
    ///
    /// Stderr is discarded. On timeout the child is killed.
    pub fn run_with_input(&self, input: &str) -> Result<CommandOutput, CommandError> {
        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        // Feed stdin and drain stdout on their own threads so a child that
        // writes before it finishes reading cannot deadlock us.
        let mut stdin = child.stdin.take();
        let input = input.to_owned();
        let writer = std::thread::spawn(move || {
            if let Some(stdin) = stdin.as_mut() {
                // The child may exit without reading; a broken pipe is fine.
                let _ = stdin.write_all(input.as_bytes());
            }
        });

        let mut stdout = child.stdout.take();
        let reader = std::thread::spawn(move || {
            let mut buf = Vec::new();
            if let Some(out) = stdout.as_mut() {
                out.read_to_end(&mut buf)?;
            }
            Ok::<_, std::io::Error>(buf)
        });

        let status = match self.timeout {
            None => child.wait()?,
            Some(limit) => match wait_with_deadline(&mut child, limit)? {
                Some(status) => status,
                None => {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(program = %self.program, ?limit, "external command timed out");
                    return Err(CommandError::TimedOut(limit));
                }
            },
        };

        let _ = writer.join();
        let stdout = reader
            .join()
            .map_err(|_| std::io::Error::other("stdout reader panicked"))??;

        Ok(CommandOutput {
            code: status.code(),
            stdout: String::from_utf8_lossy(&stdout).into_owned(),
        })
    }

    /// Run with inherited stdio (the caller's terminal), waiting until exit.
    pub fn run_interactive(&self) -> Result<ExitStatus, CommandError> {
        self.command()
            .status()
            .map_err(|source| CommandError::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

fn wait_with_deadline(
    child: &mut std::process::Child,
    limit: Duration,
) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + limit;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        std::thread::sleep(POLL_INTERVAL);
    }
}

/// Split a command string into words with POSIX shell quoting rules.
pub fn split_command_line(line: &str) -> Result<Vec<String>, CommandError> {
    shlex::split(line)
        .ok_or_else(|| CommandError::Parse(format!("unbalanced quoting in {:?}", line)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_command_line("  llm  -m small ").unwrap(),
            vec!["llm", "-m", "small"]
        );
        assert!(split_command_line("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_quotes() {
        assert_eq!(
            split_command_line(r#"sh -c 'tr a-z A-Z' "two words" a\ b"#).unwrap(),
            vec!["sh", "-c", "tr a-z A-Z", "two words", "a b"]
        );
        assert_eq!(split_command_line(r#"x "" ''"#).unwrap(), vec!["x", "", ""]);
        assert_eq!(
            split_command_line(r#""say \"hi\"" 'it\s'"#).unwrap(),
            vec![r#"say "hi""#, r"it\s"]
        );
    }

    #[test]
    fn test_split_unbalanced_quote_fails() {
        assert!(matches!(
            split_command_line("llm 'oops"),
            Err(CommandError::Parse(_))
        ));
        assert!(split_command_line("llm \"oops").is_err());
        assert!(split_command_line("llm oops\\").is_err());
    }

    #[test]
    fn test_parse_command() {
        let cmd = ExternalCommand::parse("ollama run llama3").unwrap();
        assert_eq!(cmd.program, "ollama");
        assert_eq!(cmd.args, vec!["run", "llama3"]);
        assert!(ExternalCommand::parse("").is_err());
    }

    #[test]
    fn test_builder() {
        let cmd = ExternalCommand::new("codex")
            .arg("resume")
            .arg("abc")
            .with_timeout(Some(Duration::from_secs(3)));
        assert_eq!(cmd.args, vec!["resume", "abc"]);
        assert_eq!(cmd.timeout, Some(Duration::from_secs(3)));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_input_captures_stdout() {
        let cmd = ExternalCommand::parse("sh -c 'tr a-z A-Z'").unwrap();
        let output = cmd.run_with_input("hello\n").unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "HELLO\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_input_reports_exit_code() {
        let cmd = ExternalCommand::parse("sh -c 'echo partial; exit 3'").unwrap();
        let output = cmd.run_with_input("").unwrap();
        assert!(!output.success());
        assert_eq!(output.code, Some(3));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_with_input_times_out() {
        let cmd = ExternalCommand::parse("sh -c 'exec sleep 5'")
            .unwrap()
            .with_timeout(Some(Duration::from_millis(200)));
        let started = Instant::now();
        let result = cmd.run_with_input("ignored");
        assert!(matches!(result, Err(CommandError::TimedOut(_))));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_program_is_not_found() {
        let cmd = ExternalCommand::new("definitely-not-a-real-program-rewind");
        let err = cmd.run_with_input("").unwrap_err();
        assert!(err.is_not_found());
        let err = cmd.run_interactive().unwrap_err();
        assert!(err.is_not_found());
    }
}
