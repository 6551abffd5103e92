use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rewind")]
#[command(version)]
#[command(about = "Find, summarize and resume Codex sessions for the current git repository")]
pub struct Cli {
    /// Session-log store (default: $CODEX_HOME/sessions)
    #[arg(long, global = true)]
    pub sessions_dir: Option<PathBuf>,

    /// Summary cache directory (default: $CODEX_HOME/session_summaries)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Match session cwd against the repository root by whole path components
    #[arg(long, global = true)]
    pub strict_root: bool,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List Codex sessions associated with the current git repository
    List {
        /// Maximum number of sessions to show (most recent first)
        #[arg(short = 'n', long)]
        num: Option<usize>,

        /// Language for output and summaries (es, en)
        #[arg(long, default_value = "es")]
        lang: String,

        /// Do not call the external summarizer
        #[arg(long)]
        no_summary: bool,

        /// Print sessions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resume the most recent Codex session of the current git repository
    Resume {
        /// Language for informational messages (es, en)
        #[arg(long, default_value = "es")]
        lang: String,
    },
}

impl Commands {
    pub fn lang(&self) -> &str {
        match self {
            Commands::List { lang, .. } | Commands::Resume { lang } => lang.as_str(),
        }
    }
}
