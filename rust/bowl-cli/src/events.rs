//! Optional NDJSON event sink for a CLI run.

use std::path::Path;

use bowl_logging::{NdjsonError, NdjsonWriter};
use serde::Serialize;

/// Writes events when `--log` was given, otherwise drops them.
///
/// A failed write disables the sink for the rest of the run; the game itself
/// never fails because of event logging.
pub struct EventSink {
    writer: Option<NdjsonWriter>,
}

impl EventSink {
    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, NdjsonError> {
        Ok(Self {
            writer: Some(NdjsonWriter::open_append_with_flush(path, 1)?),
        })
    }

    pub fn emit<T: Serialize>(&mut self, event: &T) {
        let Some(w) = self.writer.as_mut() else {
            return;
        };
        if let Err(e) = w.write_event(event) {
            eprintln!("warning: {e}; event logging disabled");
            self.writer = None;
        }
    }

    pub fn flush(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            if let Err(e) = w.flush() {
                eprintln!("warning: {e}");
            }
        }
    }
}
