use rewind_core::Config;
use rewind_store::Paths;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Store {
    pub home: TempDir,
}

impl Store {
    pub fn new() -> Self {
        let home = TempDir::new().unwrap();
        std::fs::create_dir_all(home.path().join("sessions")).unwrap();
        Self { home }
    }

    pub fn config(&self) -> Config {
        Config::new(&Paths::from_home(self.home.path()))
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.home.path().join("sessions")
    }

    /// Write a session log at `rel` (relative to the store) and return its path
    pub fn write(&self, rel: &str, records: &[Value]) -> PathBuf {
        let path = self.sessions_dir().join(rel);
        write_records(&path, records);
        path
    }
}

pub fn write_records(path: &Path, records: &[Value]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let content: String = records
        .iter()
        .map(|r| format!("{}\n", r))
        .collect();
    std::fs::write(path, content).unwrap();
}

pub fn meta(id: &str, created: Option<&str>, cwd: Option<&str>, url: Option<&str>) -> Value {
    let mut payload = json!({"id": id, "git": {"branch": "main"}});
    if let Some(created) = created {
        payload["timestamp"] = json!(created);
    }
    if let Some(cwd) = cwd {
        payload["cwd"] = json!(cwd);
    }
    if let Some(url) = url {
        payload["git"]["repository_url"] = json!(url);
    }
    json!({"type": "session_meta", "timestamp": created, "payload": payload})
}

pub fn user(ts: &str, message: &str) -> Value {
    json!({"type": "event_msg", "timestamp": ts,
           "payload": {"type": "user_message", "message": message}})
}

pub fn assistant(ts: &str, message: &str) -> Value {
    json!({"type": "event_msg", "timestamp": ts,
           "payload": {"type": "assistant_message", "message": message}})
}
