mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use rewind_core::{Locale, SessionError};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the listing.
    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .init();

    let locale = Locale::resolve(cli.command.lang());

    match run(&cli, locale) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<SessionError>() {
                Some(domain) => eprintln!("{}", locale.messages().error(domain)),
                None => eprintln!("error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, locale: Locale) -> anyhow::Result<()> {
    let config = commands::build_config(cli)?;

    match &cli.command {
        Commands::List {
            num,
            no_summary,
            json,
            ..
        } => commands::list::run(
            &config,
            &commands::list::ListOptions {
                locale,
                num: *num,
                show_summaries: !no_summary,
                json: *json,
            },
        ),
        Commands::Resume { .. } => commands::resume::run(&config, locale),
    }
}
