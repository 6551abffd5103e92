use rewind_core::{Config, Locale, RepositoryIdentity, Session, find_sessions, format_local};
use rewind_summary::{CommandSummarizer, Summarize, SummaryCache};
use std::io::Write;

pub struct ListOptions {
    pub locale: Locale,
    pub num: Option<usize>,
    pub show_summaries: bool,
    pub json: bool,
}

pub fn run(config: &Config, options: &ListOptions) -> anyhow::Result<()> {
    let identity = RepositoryIdentity::resolve(&std::env::current_dir()?);

    let command_summarizer = CommandSummarizer::new(config.summarizer.clone());
    let summarizer: Option<&dyn Summarize> =
        if options.show_summaries && command_summarizer.is_configured() {
            Some(&command_summarizer)
        } else {
            None
        };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    list_sessions(config, &identity, options, summarizer, &mut out)?;
    Ok(())
}

/// Find the repository's sessions and print them. Summaries are computed
/// (or read from the cache) only when a summarizer is given.
pub fn list_sessions(
    config: &Config,
    identity: &RepositoryIdentity,
    options: &ListOptions,
    summarizer: Option<&dyn Summarize>,
    out: &mut dyn Write,
) -> anyhow::Result<Vec<Session>> {
    let sessions = find_sessions(config, identity)?;
    print_sessions(config, identity, sessions, options, summarizer, out)
}

fn print_sessions(
    config: &Config,
    identity: &RepositoryIdentity,
    mut sessions: Vec<Session>,
    options: &ListOptions,
    summarizer: Option<&dyn Summarize>,
    out: &mut dyn Write,
) -> anyhow::Result<Vec<Session>> {
    if let Some(num) = options.num.filter(|n| *n > 0) {
        sessions.truncate(num);
    }

    let cache = SummaryCache::new(&config.cache_root, config.max_context_events);
    let summaries: Vec<Option<String>> = sessions
        .iter()
        .map(|s| summarizer.and_then(|sm| summary_for(&cache, s, options.locale, sm)))
        .collect();

    if options.json {
        write_json(&sessions, &summaries, out)?;
    } else {
        write_text(config, identity, &sessions, &summaries, options.locale, out)?;
    }
    out.flush()?;
    Ok(sessions)
}

fn summary_for(
    cache: &SummaryCache,
    session: &Session,
    locale: Locale,
    summarizer: &dyn Summarize,
) -> Option<String> {
    match cache.get_or_create(session, locale, summarizer) {
        Ok(summary) => Some(summary).filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::warn!(session_id = %session.session_id, error = %e, "summary unavailable");
            None
        }
    }
}

fn write_text(
    config: &Config,
    identity: &RepositoryIdentity,
    sessions: &[Session],
    summaries: &[Option<String>],
    locale: Locale,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let t = locale.messages();
    let resume_cmd = config.resume.display();

    writeln!(out, "{} {}", t.header, identity.label())?;
    writeln!(out)?;

    for (i, (session, summary)) in sessions.iter().zip(summaries).enumerate() {
        writeln!(
            out,
            "[{}] {} → {}  ({}: {})",
            i + 1,
            format_local(session.created_at.as_deref()),
            format_local(session.ended_at.as_deref()),
            t.branch,
            session.branch.as_deref().unwrap_or("?"),
        )?;
        writeln!(out, "    {} {}", resume_cmd, session.session_id)?;
        writeln!(out, "    {}: {}", t.cwd, session.cwd.as_deref().unwrap_or("?"))?;
        writeln!(
            out,
            "    {}: {}",
            t.last_user_msg,
            session.last_user_message.as_deref().unwrap_or(t.no_user_msg)
        )?;

        if let Some(summary) = summary {
            writeln!(out, "    {}:", t.summary)?;
            for line in summary.lines() {
                writeln!(out, "      {}", line)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_json(
    sessions: &[Session],
    summaries: &[Option<String>],
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    let mut entries = Vec::with_capacity(sessions.len());
    for (session, summary) in sessions.iter().zip(summaries) {
        let mut entry = serde_json::to_value(session)?;
        entry["summary"] = serde_json::json!(summary);
        entries.push(entry);
    }
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}
