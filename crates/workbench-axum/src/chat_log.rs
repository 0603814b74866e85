//! Append-only JSON-lines log of chat exchanges.

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::HttpError;

#[derive(Serialize)]
struct ChatLogLine<'a> {
    ts: String,
    prompt: &'a str,
    system_prompt: &'a str,
    response: &'a str,
}

/// Chat history file, one JSON object per line.
#[derive(Debug, Clone)]
pub struct ChatLog {
    path: PathBuf,
}

impl ChatLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one exchange, creating the parent directory on demand.
    pub async fn append(
        &self,
        prompt: &str,
        system_prompt: &str,
        response: &str,
    ) -> Result<(), HttpError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(&e))?;
        }

        let line = ChatLogLine {
            ts: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
            prompt,
            system_prompt,
            response,
        };
        let mut json = serde_json::to_string(&line)
            .map_err(|e| HttpError::Internal(format!("Failed to encode chat log line: {e}")))?;
        json.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(&e))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|e| self.io_error(&e))?;
        file.flush().await.map_err(|e| self.io_error(&e))
    }

    fn io_error(&self, err: &std::io::Error) -> HttpError {
        HttpError::Internal(format!(
            "Failed to write chat log {}: {err}",
            self.path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_writes_one_line_per_exchange() {
        let temp = tempfile::tempdir().unwrap();
        let log = ChatLog::new(temp.path().join("logs").join("chat.jsonl"));

        log.append("hi", "", "hello").await.unwrap();
        log.append("again", "be brief", "ok").await.unwrap();

        let raw = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["prompt"], "hi");
        assert_eq!(lines[1]["system_prompt"], "be brief");
        assert_eq!(lines[1]["response"], "ok");

        let ts = lines[0]["ts"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }
}
