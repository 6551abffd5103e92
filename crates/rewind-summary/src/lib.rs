//! Session summaries computed by an external summarizer and cached on disk

mod cache;
mod prompt;
mod summarizer;

pub use cache::{CacheError, SummaryCache};
pub use prompt::build_summary_prompt;
pub use summarizer::{CommandSummarizer, Summarize};
