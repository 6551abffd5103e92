//! On-disk layout of the assistant home: session-log store and summary cache

mod io;
mod paths;

pub use io::{atomic_write, read_jsonl_strict, JsonlError};
pub use paths::{Paths, CODEX_HOME_ENV};
