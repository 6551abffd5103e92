//! Summarizer seam and the external-command implementation

use crate::prompt::build_summary_prompt;
use rewind_core::{ExternalCommand, Locale};

/// Turns a session context into a short natural-language summary
pub trait Summarize {
    /// `None` when no summary could be produced
    fn summarize(&self, context: &str, locale: Locale) -> Option<String>;
}

/// Pipes the localized prompt into a configured external command
#[derive(Debug, Clone)]
pub struct CommandSummarizer {
    command: Option<ExternalCommand>,
}

impl CommandSummarizer {
    pub fn new(command: Option<ExternalCommand>) -> Self {
        Self { command }
    }

    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }
}

impl Summarize for CommandSummarizer {
    fn summarize(&self, context: &str, locale: Locale) -> Option<String> {
        let command = self.command.as_ref()?;
        let prompt = build_summary_prompt(context, locale);

        let output = match command.run_with_input(&prompt) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(program = %command.program, error = %e, "summarizer failed");
                return None;
            }
        };
        if !output.success() {
            tracing::warn!(program = %command.program, code = ?output.code, "summarizer exited with failure");
            return None;
        }

        let summary = output.stdout.trim();
        (!summary.is_empty()).then(|| summary.to_string())
    }
}
