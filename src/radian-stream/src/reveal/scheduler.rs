//! Reveal scheduler: decides which bullets are currently visible.

use radian_summary::{FinalSummary, SummarySnapshot};
use tracing::{debug, warn};

use super::typewriter::Typewriter;
use crate::config::RevealConfig;

/// Decouples "parsed and available" from "shown to the viewer".
///
/// Bullets are exposed strictly in order, one at a time: the next bullet
/// appears only after the previous one finished its character-reveal
/// animation plus a short pacing delay, regardless of how fast the
/// underlying text streamed in. The reveal frontier (`visible`) is
/// monotonically non-decreasing for the lifetime of one session.
///
/// The in-progress tail bullet is shown as an extra, still-animating
/// entry once the frontier has caught up with the completed list. When
/// that tail closes into a completed bullet, its animation is promoted
/// into the bullet's reveal, carrying visible progress, so the text
/// never disappears and never re-animates.
pub struct RevealScheduler {
    chars_per_frame: f32,
    pacing_frames: u32,

    /// Free-running headline animation.
    headline: Typewriter,

    /// Bullets known so far (completed during streaming, authoritative
    /// after finalization). Never shrinks while streaming.
    bullets: Vec<String>,

    /// One reveal animation per exposed bullet; `reveals.len()` trails
    /// `visible` only when finalization shortened the bullet list.
    reveals: Vec<Typewriter>,

    /// The reveal frontier: how many bullets have been exposed.
    visible: usize,

    /// Animation for the still-open tail bullet.
    tail: Option<Typewriter>,

    /// Frames left before the next bullet may be revealed.
    pacing_left: Option<u32>,

    finalized: bool,
}

impl RevealScheduler {
    /// Creates an idle scheduler.
    pub fn new(config: &RevealConfig) -> Self {
        Self {
            chars_per_frame: config.chars_per_frame(),
            pacing_frames: config.pacing_frames(),
            headline: Typewriter::new(config.chars_per_frame()),
            bullets: Vec::new(),
            reveals: Vec::new(),
            visible: 0,
            tail: None,
            pacing_left: None,
            finalized: false,
        }
    }

    /// Feeds the latest incremental snapshot.
    ///
    /// Completed bullets are append-only here: the parser guarantees
    /// prefix stability, and the scheduler never rewrites a bullet it
    /// already knows from a snapshot.
    pub fn on_snapshot(&mut self, snapshot: &SummarySnapshot) {
        if self.finalized {
            warn!("snapshot received after finalization; ignoring");
            return;
        }

        if !snapshot.headline.is_empty() {
            self.headline.update(&snapshot.headline);
        }

        if snapshot.completed_bullets.len() < self.bullets.len() {
            warn!(
                known = self.bullets.len(),
                reported = snapshot.completed_bullets.len(),
                "snapshot reported fewer completed bullets; keeping known list"
            );
        }

        let old_len = self.bullets.len();
        for bullet in snapshot.completed_bullets.iter().skip(old_len) {
            self.bullets.push(bullet.clone());
        }
        if self.bullets.len() > old_len {
            self.try_promote_tail(old_len);
        }

        self.set_tail(&snapshot.in_progress);
        self.ensure_first_reveal();
    }

    /// Switches the scheduler's source to the authoritative final result.
    ///
    /// Already-revealed bullets snap to their final text without
    /// re-animating; bullets not yet revealed continue to appear one at
    /// a time under the same pacing rule.
    pub fn on_final(&mut self, summary: &FinalSummary) {
        self.finalized = true;

        if !summary.headline.is_empty() {
            let extends = summary.headline.starts_with(self.headline.full_text());
            self.headline.update(&summary.headline);
            if !extends {
                self.headline.skip_to_end();
            }
        }

        let caught_up = self.visible >= self.bullets.len();
        let old_tail = self.tail.take();

        self.bullets = summary.bullets.clone();

        let frontier = self.visible;
        for (i, reveal) in self.reveals.iter_mut().enumerate() {
            let Some(text) = self.bullets.get(i) else {
                continue;
            };
            if text == reveal.full_text() {
                continue;
            }
            let extends = text.starts_with(reveal.full_text());
            reveal.update(text);
            if !(i + 1 == frontier && extends) {
                // Already shown to the viewer: show the authoritative
                // form immediately instead of re-animating.
                reveal.skip_to_end();
            }
        }
        self.reveals.truncate(self.bullets.len());

        // The displayed tail either survived finalization as the next
        // bullet (its animation carries over) or was deduplicated away.
        if caught_up {
            if let (Some(tail), Some(text)) = (old_tail.as_ref(), self.bullets.get(self.visible)) {
                if !tail.full_text().is_empty() && text.starts_with(tail.full_text()) {
                    self.reveals.push(Typewriter::with_progress(
                        text.clone(),
                        tail.visible_char_count(),
                        self.chars_per_frame,
                    ));
                    self.visible += 1;
                    self.pacing_left = None;
                }
            }
        }

        self.ensure_first_reveal();
        debug!(
            bullets = self.bullets.len(),
            visible = self.visible,
            "reveal source switched to final result"
        );
    }

    /// Advances all animations by one frame and applies the pacing rule.
    ///
    /// At most one bullet is revealed per tick.
    pub fn tick(&mut self) {
        self.headline.tick();

        for reveal in &mut self.reveals {
            reveal.tick();
        }

        let frontier_done = self.reveals.last().map_or(true, |tw| tw.is_complete());
        if frontier_done && self.visible < self.bullets.len() {
            match self.pacing_left.as_mut() {
                None => self.pacing_left = Some(self.pacing_frames),
                Some(0) => {
                    self.pacing_left = None;
                    self.reveal_next();
                }
                Some(frames) => *frames -= 1,
            }
        } else {
            self.pacing_left = None;
        }

        if self.tail_displayed() {
            if let Some(tail) = &mut self.tail {
                tail.tick();
            }
        }
    }

    /// Bullets currently exposed to the viewer, frontier one partially
    /// revealed, plus the in-progress tail when caught up.
    pub fn visible_bullets(&self) -> Vec<String> {
        let shown = self.visible.min(self.reveals.len());
        let mut out: Vec<String> = self.reveals[..shown]
            .iter()
            .map(|tw| tw.visible_text().to_string())
            .collect();

        if self.tail_displayed() {
            if let Some(tail) = &self.tail {
                out.push(tail.visible_text().to_string());
            }
        }
        out
    }

    /// The currently visible portion of the headline.
    pub fn headline_text(&self) -> &str {
        self.headline.visible_text()
    }

    /// Returns `true` while the headline animation is running.
    pub fn is_headline_animating(&self) -> bool {
        !self.headline.is_complete()
    }

    /// Returns `true` while any bullet is animating or still unrevealed.
    pub fn is_bullet_animating(&self) -> bool {
        let frontier_animating = self.reveals.last().is_some_and(|tw| !tw.is_complete());
        let pending = self.visible < self.bullets.len();
        let tail_animating = self.tail_displayed()
            && self.tail.as_ref().is_some_and(|tail| !tail.is_complete());
        frontier_animating || pending || tail_animating
    }

    /// The reveal frontier. Monotonically non-decreasing.
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    fn tail_displayed(&self) -> bool {
        self.visible >= self.bullets.len()
            && self.tail.as_ref().is_some_and(|tail| !tail.full_text().is_empty())
    }

    fn set_tail(&mut self, text: &str) {
        if text.is_empty() {
            self.tail = None;
            return;
        }
        match &mut self.tail {
            Some(tail) => tail.update(text),
            None => {
                let mut tail = Typewriter::new(self.chars_per_frame);
                tail.update(text);
                self.tail = Some(tail);
            }
        }
    }

    /// Reveals the first bullet as soon as any is available.
    fn ensure_first_reveal(&mut self) {
        if self.visible == 0 && !self.bullets.is_empty() {
            self.reveal_next();
        }
    }

    fn reveal_next(&mut self) {
        let idx = self.visible;
        self.reveals.push(Typewriter::with_progress(
            self.bullets[idx].clone(),
            0,
            self.chars_per_frame,
        ));
        self.visible += 1;
        debug!(bullet = idx, "revealing bullet");
    }

    /// Hands the tail animation over to the bullet it closed into, when
    /// the tail was being displayed at the frontier and the new bullet's
    /// text extends it.
    fn try_promote_tail(&mut self, idx: usize) {
        if self.visible != idx {
            return;
        }
        let Some(tail) = self.tail.take() else {
            return;
        };
        let target = &self.bullets[idx];
        if !tail.full_text().is_empty() && target.starts_with(tail.full_text()) {
            self.reveals.push(Typewriter::with_progress(
                target.clone(),
                tail.visible_char_count(),
                self.chars_per_frame,
            ));
            self.visible += 1;
            self.pacing_left = None;
            debug!(bullet = idx, "promoted in-progress tail to revealed bullet");
        }
    }
}
