//! Event sources
//!
//! - [`MemorySource`]: an in-process queue
//! - [`NdjsonSource`]: newline-delimited JSON envelopes read from a file

use crate::event_format::{EventCodec, JsonCodec};
use crate::{EventId, EventSource, LedgerEvent, Result, TallyError};
use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Queue-backed event source
///
/// Events pushed without an explicit ID are numbered consecutively after the
/// highest ID seen so far, starting at 0.
#[derive(Debug, Default)]
pub struct MemorySource {
    queue: VecDeque<(EventId, LedgerEvent)>,
    next_id: EventId,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event under the next free ID and return that ID
    pub fn push(&mut self, event: LedgerEvent) -> EventId {
        let id = self.next_id;
        self.push_with_id(id, event);
        id
    }

    pub fn push_with_id(&mut self, id: EventId, event: LedgerEvent) {
        self.next_id = self.next_id.max(id.saturating_add(1));
        self.queue.push_back((id, event));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl FromIterator<LedgerEvent> for MemorySource {
    fn from_iter<I: IntoIterator<Item = LedgerEvent>>(iter: I) -> Self {
        let mut source = Self::new();
        for event in iter {
            source.push(event);
        }
        source
    }
}

impl EventSource for MemorySource {
    fn next_event(&mut self) -> Result<Option<(EventId, LedgerEvent)>> {
        Ok(self.queue.pop_front())
    }
}

/// Tails a file of newline-delimited envelopes
///
/// A line is consumed only once its terminating newline has been written, so
/// a writer appending concurrently never exposes half an envelope. Blank lines
/// are skipped. Reaching the end of the file reports "caught up"; lines
/// appended later are returned by subsequent calls.
pub struct NdjsonSource<C = JsonCodec> {
    path: PathBuf,
    reader: BufReader<File>,
    partial: String,
    offset: u64,
    line: u64,
    codec: C,
}

impl NdjsonSource<JsonCodec> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_codec(path, JsonCodec)
    }
}

impl<C: EventCodec> NdjsonSource<C> {
    pub fn with_codec(path: impl AsRef<Path>, codec: C) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path)?;

        tracing::debug!("Reading events from {}", path.display());

        Ok(Self {
            path,
            reader: BufReader::new(file),
            partial: String::new(),
            offset: 0,
            line: 0,
            codec,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes consumed so far (complete lines only)
    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl<C: EventCodec> EventSource for NdjsonSource<C> {
    fn next_event(&mut self) -> Result<Option<(EventId, LedgerEvent)>> {
        loop {
            let read = self.reader.read_line(&mut self.partial)?;
            if read == 0 || !self.partial.ends_with('\n') {
                // caught up, or the writer is mid-line
                return Ok(None);
            }

            let line = std::mem::take(&mut self.partial);
            self.offset += line.len() as u64;
            self.line += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let envelope = self.codec.decode(trimmed.as_bytes()).map_err(|e| {
                TallyError::EventDecode(format!("{}:{}: {}", self.path.display(), self.line, e))
            })?;
            return envelope.into_event().map(Some);
        }
    }
}
