//! Transcript Log Module
//!
//! Provides optional logging of completed exchanges to a JSON-lines file.
//! Each completed composition appends one entry with the originating request
//! text and the reply that landed. Only the most recent entries are kept so
//! the file stays manageable.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use tracing::warn;

use crate::error::AppError;
use crate::models::Message;

/// Maximum number of exchanges to keep in the transcript file
const MAX_ENTRIES: usize = 100;

/// Represents a single completed exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeEntry {
    /// Time the reply landed on the timeline
    pub timestamp: DateTime<Local>,
    /// The request text that triggered the reply (quick-action prompts
    /// included, even when no user message was appended)
    pub request: Option<String>,
    /// Kind label of the reply message
    pub reply_kind: String,
    /// Reply text
    pub reply_content: String,
}

/// Append-only transcript of completed exchanges, backed by a single file
#[derive(Debug, Clone)]
pub struct TranscriptLog {
    /// Path to the transcript file
    path: PathBuf,
}

impl TranscriptLog {
    /// Creates a transcript log at the given path, creating parent
    /// directories as needed. The file itself is created on first append.
    pub fn new(path: PathBuf) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    /// Gets the path to the transcript file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Appends one completed exchange, rotating out the oldest entries
    /// beyond the retention cap.
    pub fn append_exchange(
        &self,
        request: Option<&str>,
        reply: &Message,
    ) -> Result<(), AppError> {
        let entry = ExchangeEntry {
            timestamp: Local::now(),
            request: request.map(|s| s.to_string()),
            reply_kind: reply.kind.label().to_string(),
            reply_content: reply.content.clone(),
        };

        let mut entries = self.read_entries();
        entries.push(entry);
        while entries.len() > MAX_ENTRIES {
            entries.remove(0);
        }
        self.write_entries(&entries)?;
        Ok(())
    }

    /// Reads and returns all entries currently in the transcript file.
    pub fn recent(&self) -> Vec<ExchangeEntry> {
        self.read_entries()
    }

    /// Gets the number of entries currently stored.
    pub fn entry_count(&self) -> usize {
        self.read_entries().len()
    }

    /// Reads existing entries from the transcript file.
    fn read_entries(&self) -> Vec<ExchangeEntry> {
        if !self.path.exists() {
            return Vec::new();
        }

        match fs::File::open(&self.path) {
            Ok(file) => {
                let reader = BufReader::new(file);
                let mut entries = Vec::new();

                for line in reader.lines().map_while(Result::ok) {
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    match serde_json::from_str::<ExchangeEntry>(trimmed) {
                        Ok(entry) => entries.push(entry),
                        Err(e) => {
                            warn!("Failed to parse transcript entry: {} - line: {}", e, trimmed);
                        }
                    }
                }

                entries
            }
            Err(e) => {
                warn!("Failed to open transcript file: {}", e);
                Vec::new()
            }
        }
    }

    /// Writes all entries to the transcript file.
    fn write_entries(&self, entries: &[ExchangeEntry]) -> std::io::Result<()> {
        let mut file = fs::File::create(&self.path)?;

        // Write header
        writeln!(
            file,
            "# PulseBoard Assistant Transcript - Last {} exchanges",
            entries.len().min(MAX_ENTRIES)
        )?;
        writeln!(
            file,
            "# Generated: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        )?;
        writeln!(file, "# Each line is a JSON object representing one exchange")?;
        writeln!(file)?;

        // Write each exchange as a JSON line
        for entry in entries {
            match serde_json::to_string(entry) {
                Ok(json) => {
                    writeln!(file, "{}", json)?;
                }
                Err(e) => {
                    warn!("Failed to serialize transcript entry: {}", e);
                }
            }
        }

        Ok(())
    }
}
