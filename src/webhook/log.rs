use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::webhook::WebhookError;

pub const LOG_FILE_NAME: &str = "webhook.log";

/// One line of the append-only log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// RFC 3339 UTC timestamp taken when the payload was accepted.
    pub received_at: String,
    /// The original JSON document, verbatim.
    pub payload: Value,
}

/// Append-only JSONL payload log.
///
/// The file is opened per append, so the log stays valid across crashes and
/// external rotation; a mutex serializes concurrent handler writes.
pub struct WebhookLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl WebhookLog {
    /// Creates the log directory if missing and points at `webhook.log`
    /// inside it. Called once from server construction.
    pub fn new(dir: &Path) -> Result<Self, WebhookError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(LOG_FILE_NAME),
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one timestamped line wrapping `payload`.
    pub fn append(&self, payload: &Value) -> Result<LogEntry, WebhookError> {
        let entry = LogEntry {
            received_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            payload: payload.clone(),
        };
        let line = serde_json::to_string(&entry)?;

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(entry)
    }
}
