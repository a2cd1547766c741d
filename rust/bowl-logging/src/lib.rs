//! bowl-logging: NDJSON game events + debug logging switch.
//!
//! Events are append-only, one JSON object per line, so a session log stays
//! readable even if the process dies mid-write.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use thiserror::Error;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Event schema version.
pub const EVENT_SCHEMA_VERSION: u32 = 1;

pub const RULESET_ID: &str = "ten_pin_v1";

/// Environment switch for debug lines on stderr.
pub const DEBUG_ENV: &str = "BOWL_DEBUG_LOG";

pub fn now_ms() -> u64 {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    d.as_millis() as u64
}

pub fn hash_config_bytes(bytes: &[u8]) -> String {
    blake3::hash(bytes).to_hex().to_string()
}

/// True when `BOWL_DEBUG_LOG` is `1`, `true` or `yes`. Read once per process.
pub fn debug_enabled() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| {
        matches!(
            std::env::var(DEBUG_ENV).as_deref(),
            Ok("1" | "true" | "yes")
        )
    })
}

/// Print a debug line to stderr when debug logging is on.
///
/// The message is only built when it will be printed.
pub fn debug_log(msg: impl FnOnce() -> String) {
    if debug_enabled() {
        eprintln!("[bowl debug {}] {}", now_ms(), msg());
    }
}

/// Versioning block carried by every event.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfoV1 {
    pub schema_version: u32,
    pub ruleset_id: &'static str,
    pub bowl_version: &'static str,
}

impl Default for VersionInfoV1 {
    fn default() -> Self {
        Self {
            schema_version: EVENT_SCHEMA_VERSION,
            ruleset_id: RULESET_ID,
            bowl_version: VERSION,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStartedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub bonus_policy: String,
    pub config_hash: Option<String>,
}

impl GameStartedEventV1 {
    pub fn new(bonus_policy: impl Into<String>, config_hash: Option<String>) -> Self {
        Self {
            event: "game_started",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            bonus_policy: bonus_policy.into(),
            config_hash,
        }
    }
}

/// A frame (or the 10th-frame bonus set) was accepted.
#[derive(Debug, Clone, Serialize)]
pub struct FrameRecordedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub frame: u8,
    pub bonus: bool,
    /// Rolls appended to the log by this entry.
    pub rolls: Vec<u8>,
    pub log_len: usize,
}

impl FrameRecordedEventV1 {
    pub fn new(frame: u8, bonus: bool, rolls: Vec<u8>, log_len: usize) -> Self {
        Self {
            event: "frame_recorded",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            frame,
            bonus,
            rolls,
            log_len,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InputRejectedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub frame: u8,
    pub input: String,
    pub reason: String,
}

impl InputRejectedEventV1 {
    pub fn new(frame: u8, input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            event: "input_rejected",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            frame,
            input: input.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameCompletedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub score: u16,
    pub rolls: Vec<u8>,
    pub frame_totals: Vec<u16>,
}

impl GameCompletedEventV1 {
    pub fn new(score: u16, rolls: Vec<u8>, frame_totals: Vec<u16>) -> Self {
        Self {
            event: "game_completed",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            score,
            rolls,
            frame_totals,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameAbortedEventV1 {
    pub event: &'static str,
    pub ts_ms: u64,
    pub v: VersionInfoV1,

    pub frame: u8,
    /// `quit` or `eof`.
    pub reason: &'static str,
}

impl GameAbortedEventV1 {
    pub fn new(frame: u8, reason: &'static str) -> Self {
        Self {
            event: "game_aborted",
            ts_ms: now_ms(),
            v: VersionInfoV1::default(),
            frame,
            reason,
        }
    }
}

#[derive(Debug, Error)]
pub enum NdjsonError {
    #[error("event log I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("event serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Append-only NDJSON writer.
///
/// Contract: each call writes exactly one JSON object followed by a newline.
pub struct NdjsonWriter {
    w: BufWriter<File>,
    lines_since_flush: u64,
    flush_every_lines: u64,
}

impl NdjsonWriter {
    /// Open a file for append. Creates it if it doesn't exist.
    pub fn open_append(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Self::open_append_with_flush(path, 0)
    }

    /// `flush_every_lines=0` disables periodic flushing.
    pub fn open_append_with_flush(
        path: impl AsRef<Path>,
        flush_every_lines: u64,
    ) -> Result<Self, NdjsonError> {
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            w: BufWriter::new(f),
            lines_since_flush: 0,
            flush_every_lines,
        })
    }

    pub fn write_event<T: Serialize>(&mut self, event: &T) -> Result<(), NdjsonError> {
        let mut buf = serde_json::to_vec(event)?;
        buf.push(b'\n');
        self.w.write_all(&buf)?;
        self.lines_since_flush += 1;
        if self.flush_every_lines > 0 && self.lines_since_flush >= self.flush_every_lines {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), NdjsonError> {
        self.w.flush()?;
        self.lines_since_flush = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use serde_json::Value;

    fn read_ndjson_lenient(path: &Path) -> Vec<Value> {
        let s = fs::read_to_string(path).expect("read");
        s.lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str::<Value>(line).ok())
            .collect()
    }

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn writes_one_valid_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append(&path).unwrap();

        w.write_event(&GameStartedEventV1::new("legacy", None))
            .unwrap();
        w.write_event(&FrameRecordedEventV1::new(1, false, vec![10], 1))
            .unwrap();
        w.write_event(&GameCompletedEventV1::new(300, vec![10; 12], vec![30; 10]))
            .unwrap();
        w.flush().unwrap();

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 3);
        assert_eq!(vals[0]["event"], "game_started");
        assert_eq!(vals[0]["bonus_policy"], "legacy");
        assert_eq!(vals[0]["v"]["ruleset_id"], RULESET_ID);
        assert_eq!(vals[1]["event"], "frame_recorded");
        assert_eq!(vals[1]["rolls"][0], 10);
        assert_eq!(vals[2]["score"], 300);
        assert_eq!(vals[2]["rolls"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn reopening_appends_instead_of_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");

        for frame in 1..=2u8 {
            let mut w = NdjsonWriter::open_append(&path).unwrap();
            w.write_event(&GameAbortedEventV1::new(frame, "quit"))
                .unwrap();
            w.flush().unwrap();
        }

        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 2);
        assert_eq!(vals[0]["frame"], 1);
        assert_eq!(vals[1]["frame"], 2);
        assert_eq!(vals[1]["reason"], "quit");
    }

    #[test]
    fn periodic_flush_makes_lines_visible() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.ndjson");
        let mut w = NdjsonWriter::open_append_with_flush(&path, 1).unwrap();

        w.write_event(&InputRejectedEventV1::new(3, "6, 6", "sum exceeds 10"))
            .unwrap();

        // No explicit flush: flush_every_lines=1 already pushed the line out.
        let vals = read_ndjson_lenient(&path);
        assert_eq!(vals.len(), 1);
        assert_eq!(vals[0]["input"], "6, 6");
    }

    #[test]
    fn config_hash_is_stable_hex() {
        let a = hash_config_bytes(b"bonus_policy: rules\n");
        let b = hash_config_bytes(b"bonus_policy: rules\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert_ne!(a, hash_config_bytes(b"bonus_policy: legacy\n"));
    }
}
