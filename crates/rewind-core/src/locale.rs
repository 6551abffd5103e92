//! User-facing message sets

use crate::error::SessionError;

/// Supported output languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    Es,
    En,
}

/// Every string the list and resume actions print
#[derive(Debug)]
pub struct Messages {
    pub no_sessions_dir: &'static str,
    pub not_in_repo: &'static str,
    pub no_sessions_for_repo: &'static str,
    pub header: &'static str,
    pub branch: &'static str,
    pub cwd: &'static str,
    pub last_user_msg: &'static str,
    pub no_user_msg: &'static str,
    pub summary: &'static str,
    pub resuming: &'static str,
    pub resume_tool_missing: &'static str,
    pub resume_failed: &'static str,
}

static ES: Messages = Messages {
    no_sessions_dir: "No se encontró ~/.codex/sessions; ¿Codex ha creado alguna sesión?",
    not_in_repo: "No parece que estés dentro de un repositorio git.",
    no_sessions_for_repo: "No se encontraron sesiones de Codex asociadas a este repositorio.",
    header: "Sesiones de Codex para el repo:",
    branch: "rama",
    cwd: "cwd",
    last_user_msg: "último mensaje del usuario",
    no_user_msg: "(sin mensaje del usuario)",
    summary: "resumen",
    resuming: "Reanudando la última sesión:",
    resume_tool_missing: "No se encontró el comando '{program}' en el PATH.",
    resume_failed: "No se pudo ejecutar '{program}':",
};

static EN: Messages = Messages {
    no_sessions_dir: "Could not find ~/.codex/sessions; has Codex created any session?",
    not_in_repo: "It does not look like you are inside a git repository.",
    no_sessions_for_repo: "No Codex sessions were found for this repository.",
    header: "Codex sessions for repo:",
    branch: "branch",
    cwd: "cwd",
    last_user_msg: "last user msg",
    no_user_msg: "(no user message)",
    summary: "summary",
    resuming: "Resuming last session:",
    resume_tool_missing: "Could not find the '{program}' command in PATH.",
    resume_failed: "Failed to run '{program}':",
};

impl Locale {
    /// Resolve a language code; anything unrecognized falls back to English
    pub fn resolve(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Locale::Es,
            _ => Locale::En,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::Es => &ES,
            Locale::En => &EN,
        }
    }
}

impl Messages {
    /// Localized text for a domain error
    pub fn error(&self, err: &SessionError) -> &'static str {
        match err {
            SessionError::StoreNotFound(_) => self.no_sessions_dir,
            SessionError::NotInRepository => self.not_in_repo,
            SessionError::NoMatchingSessions => self.no_sessions_for_repo,
        }
    }

    pub fn resume_tool_missing(&self, program: &str) -> String {
        self.resume_tool_missing.replace("{program}", program)
    }

    pub fn resume_failed(&self, program: &str) -> String {
        self.resume_failed.replace("{program}", program)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_resolve_with_fallback() {
        assert_eq!(Locale::resolve("es"), Locale::Es);
        assert_eq!(Locale::resolve("ES"), Locale::Es);
        assert_eq!(Locale::resolve("en"), Locale::En);
        assert_eq!(Locale::resolve("fr"), Locale::En);
        assert_eq!(Locale::resolve(""), Locale::En);
        assert_eq!(Locale::default(), Locale::Es);
    }

    #[test]
    fn test_error_messages_are_distinct() {
        let m = Locale::En.messages();
        let store = m.error(&SessionError::StoreNotFound(PathBuf::from("/x")));
        let repo = m.error(&SessionError::NotInRepository);
        let none = m.error(&SessionError::NoMatchingSessions);
        assert_ne!(store, repo);
        assert_ne!(repo, none);
        assert_ne!(store, none);
        assert!(Locale::Es.messages().error(&SessionError::NotInRepository).contains("git"));
    }

    #[test]
    fn test_resume_tool_missing_names_program() {
        assert_eq!(
            Locale::En.messages().resume_tool_missing("codex"),
            "Could not find the 'codex' command in PATH."
        );
        assert!(Locale::Es.messages().resume_tool_missing("codex").contains("'codex'"));
    }
}
