pub mod list;
pub mod resume;

use crate::cli::Cli;
use rewind_core::{Config, RootMatch};
use rewind_store::Paths;

/// Environment defaults overridden by global CLI flags
pub fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let paths = Paths::new()?;
    let mut config = Config::from_env(&paths);

    if let Some(dir) = &cli.sessions_dir {
        config.store_root = dir.clone();
    }
    if let Some(dir) = &cli.cache_dir {
        config.cache_root = dir.clone();
    }
    if cli.strict_root {
        config.root_match = RootMatch::Segment;
    }

    tracing::debug!(
        store_root = %config.store_root.display(),
        cache_root = %config.cache_root.display(),
        summarizer = config.summarizer.is_some(),
        "configuration"
    );
    Ok(config)
}
