//! One streaming summary session: buffer, parse, schedule, project.

use std::time::Duration;

use futures::{Stream, StreamExt};
use radian_summary::{parse_final, parse_incremental, FinalSummary, SummarySnapshot};
use serde::Serialize;
use thiserror::Error;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, warn};

use crate::config::RevealConfig;
use crate::reveal::RevealScheduler;
use crate::source::{ChunkEvent, Utf8ChunkBuffer};

/// Transport-level session failure.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The chunk source went away without sending a terminal event.
    #[error("chunk source disconnected before a terminal event")]
    Disconnected,
}

/// A render-ready view of the session, recomputed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryProjection {
    pub headline: String,
    pub visible_bullets: Vec<String>,
    pub is_headline_animating: bool,
    pub is_bullet_animating: bool,
    pub is_streaming: bool,
    pub error: Option<String>,
}

/// State machine for one subject's streaming summary.
///
/// Chunks go in, a [`SummaryProjection`] comes out. The session owns the
/// accumulated text buffer, reparses it as it grows, feeds snapshots to
/// the reveal scheduler, and switches to the authoritative final parse
/// when the stream completes.
pub struct SummarySession {
    config: RevealConfig,
    subject_id: String,
    bytes: Utf8ChunkBuffer,
    buffer: String,
    /// Buffer length at the last reparse; reparsing is throttled to
    /// every `reparse_min_growth` new bytes.
    last_parsed_len: usize,
    snapshot: SummarySnapshot,
    final_summary: Option<FinalSummary>,
    error: Option<String>,
    streaming: bool,
    scheduler: RevealScheduler,
}

impl SummarySession {
    /// Creates an idle session. Call [`start`](Self::start) before
    /// feeding chunks.
    pub fn new(config: RevealConfig) -> Self {
        let scheduler = RevealScheduler::new(&config);
        Self {
            config,
            subject_id: String::new(),
            bytes: Utf8ChunkBuffer::new(),
            buffer: String::new(),
            last_parsed_len: 0,
            snapshot: SummarySnapshot::default(),
            final_summary: None,
            error: None,
            streaming: false,
            scheduler,
        }
    }

    /// Begins a fresh stream for `subject_id`, discarding any previous
    /// session state.
    pub fn start(&mut self, subject_id: impl Into<String>) {
        let subject_id = subject_id.into();
        if self.streaming {
            warn!(previous = %self.subject_id, "starting a new session over an active one");
        }
        self.subject_id = subject_id;
        self.bytes = Utf8ChunkBuffer::new();
        self.buffer.clear();
        self.last_parsed_len = 0;
        self.snapshot = SummarySnapshot::default();
        self.final_summary = None;
        self.error = None;
        self.streaming = true;
        self.scheduler = RevealScheduler::new(&self.config);
        debug!(subject = %self.subject_id, "summary session started");
    }

    /// Appends a raw chunk to the buffer and reparses once enough new
    /// text has accumulated.
    ///
    /// Chunks arriving outside an active stream are dropped.
    pub fn on_chunk(&mut self, chunk: &[u8]) {
        if !self.streaming {
            warn!(
                subject = %self.subject_id,
                len = chunk.len(),
                "dropping chunk outside an active stream"
            );
            return;
        }
        if let Some(text) = self.bytes.push(chunk) {
            self.buffer.push_str(&text);
        }
        if self.buffer.len() - self.last_parsed_len >= self.config.reparse_min_growth {
            self.reparse();
        }
    }

    /// Marks the stream complete and switches to the final parse of the
    /// whole buffer.
    pub fn on_complete(&mut self) {
        if !self.streaming {
            warn!(subject = %self.subject_id, "completion signal outside an active stream");
            return;
        }
        let tail = self.bytes.flush();
        if !tail.is_empty() {
            self.buffer.push_str(&tail);
        }
        self.streaming = false;

        let summary = parse_final(&self.buffer);
        debug!(
            subject = %self.subject_id,
            bullets = summary.bullets.len(),
            "stream complete"
        );
        self.scheduler.on_final(&summary);
        self.final_summary = Some(summary);
    }

    /// Records a stream failure. Partial content is abandoned.
    pub fn on_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(subject = %self.subject_id, error = %message, "stream failed");
        self.streaming = false;
        self.error = Some(message);
    }

    /// Applies one source event.
    pub fn apply(&mut self, event: ChunkEvent) {
        match event {
            ChunkEvent::Delta(text) => self.on_chunk(text.as_bytes()),
            ChunkEvent::Complete => self.on_complete(),
            ChunkEvent::Error(message) => self.on_error(message),
        }
    }

    /// Advances reveal animations by one frame. A no-op after an error.
    pub fn tick(&mut self) {
        if self.error.is_some() {
            return;
        }
        self.scheduler.tick();
    }

    /// The current render-ready view.
    pub fn projection(&self) -> SummaryProjection {
        if let Some(error) = &self.error {
            return SummaryProjection {
                headline: String::new(),
                visible_bullets: Vec::new(),
                is_headline_animating: false,
                is_bullet_animating: false,
                is_streaming: false,
                error: Some(error.clone()),
            };
        }
        SummaryProjection {
            headline: self.scheduler.headline_text().to_string(),
            visible_bullets: self.scheduler.visible_bullets(),
            is_headline_animating: self.scheduler.is_headline_animating(),
            is_bullet_animating: self.scheduler.is_bullet_animating(),
            is_streaming: self.streaming,
            error: None,
        }
    }

    /// The authoritative parse of the completed stream, once available.
    pub fn final_summary(&self) -> Option<&FinalSummary> {
        self.final_summary.as_ref()
    }

    /// The latest incremental parse of the buffer.
    pub fn snapshot(&self) -> &SummarySnapshot {
        &self.snapshot
    }

    /// `true` once the session reached a terminal state and every
    /// animation has run to completion.
    pub fn is_settled(&self) -> bool {
        if self.streaming {
            return false;
        }
        if self.error.is_some() {
            return true;
        }
        !self.scheduler.is_bullet_animating() && !self.scheduler.is_headline_animating()
    }

    fn reparse(&mut self) {
        self.snapshot = parse_incremental(&self.buffer);
        self.last_parsed_len = self.buffer.len();
        self.scheduler.on_snapshot(&self.snapshot);
    }
}

/// Pumps `events` into the session while ticking animations at a fixed
/// frame interval, then keeps ticking until the session settles.
pub async fn drive<S>(
    session: &mut SummarySession,
    mut events: S,
    frame: Duration,
) -> Result<(), SessionError>
where
    S: Stream<Item = ChunkEvent> + Unpin,
{
    let mut frames = interval(frame);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(event) => {
                    let terminal = !matches!(event, ChunkEvent::Delta(_));
                    session.apply(event);
                    if terminal {
                        break;
                    }
                }
                None => {
                    session.on_error("chunk source disconnected");
                    return Err(SessionError::Disconnected);
                }
            },
            _ = frames.tick() => session.tick(),
        }
    }

    while !session.is_settled() {
        frames.tick().await;
        session.tick();
    }
    Ok(())
}
