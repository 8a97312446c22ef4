//! Chunk-source interface: events, stream plumbing, UTF-8 reassembly.
//!
//! The transport (a chunked HTTP response or equivalent) is an external
//! collaborator. It delivers zero or more text fragments in order,
//! followed by exactly one terminal event: completion or failure.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// One event from the chunk source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ChunkEvent {
    /// A text fragment. Split points are arbitrary: a fragment may split
    /// a marker or a word.
    Delta(String),
    /// The stream finished successfully.
    Complete,
    /// The stream failed; the message is surfaced to the viewer.
    Error(String),
}

/// Async stream of chunk events over an mpsc channel.
pub struct ChunkStream {
    receiver: mpsc::Receiver<ChunkEvent>,
}

impl ChunkStream {
    /// Wraps an existing receiver.
    pub fn new(receiver: mpsc::Receiver<ChunkEvent>) -> Self {
        Self { receiver }
    }

    /// Creates a sender/stream pair.
    pub fn channel(buffer: usize) -> (mpsc::Sender<ChunkEvent>, Self) {
        let (tx, rx) = mpsc::channel(buffer);
        (tx, Self::new(rx))
    }
}

impl Stream for ChunkStream {
    type Item = ChunkEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}

/// Reassembles UTF-8 text from byte frames with arbitrary split points.
///
/// A multi-byte code point split across two frames is held back until
/// its remaining bytes arrive; genuinely invalid bytes are replaced with
/// U+FFFD rather than stalling the stream.
#[derive(Debug, Default)]
pub struct Utf8ChunkBuffer {
    pending: Vec<u8>,
}

impl Utf8ChunkBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes raw bytes and returns any complete text they unlock.
    pub fn push(&mut self, data: &[u8]) -> Option<String> {
        self.pending.extend_from_slice(data);

        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    let rest = self.pending.split_off(valid);
                    if let Ok(text) = std::str::from_utf8(&self.pending) {
                        out.push_str(text);
                    }
                    self.pending = rest;

                    match err.error_len() {
                        // Incomplete trailing sequence: wait for more bytes.
                        None => break,
                        // Invalid bytes: replace and keep scanning.
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..len);
                        }
                    }
                }
            }
        }

        if out.is_empty() {
            None
        } else {
            Some(out)
        }
    }

    /// Flushes whatever is left, lossily.
    pub fn flush(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        let bytes = std::mem::take(&mut self.pending);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Returns `true` if no bytes are held back.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
