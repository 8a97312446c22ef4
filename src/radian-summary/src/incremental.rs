//! Incremental structure parser for a still-growing buffer.

use crate::markers::{
    bullet_section, extract_headline, normalize_headline, walk_bullets, MarkerSet,
};
use crate::types::SummarySnapshot;

/// Parses a best-effort snapshot out of the buffer accumulated so far.
///
/// Pure and idempotent: the same buffer always yields the same snapshot,
/// and a buffer extended by append yields a snapshot whose
/// `completed_bullets` is an ordered superset-prefix of the previous
/// one. A bullet once reported complete is never revised; only the
/// in-progress tail keeps mutating until a later marker closes it.
///
/// Callers should throttle invocation (re-parse only after the buffer
/// has grown past a minimum increment, or when the stream has ended);
/// correctness does not depend on that, only re-parse cost does.
pub fn parse_incremental(buffer: &str) -> SummarySnapshot {
    let headline = match extract_headline(buffer, MarkerSet::Streaming) {
        Some(text) if !text.is_empty() => normalize_headline(&text),
        _ => String::new(),
    };

    let mut completed: Vec<String> = Vec::new();
    let mut in_progress = String::new();

    if let Some(section) = bullet_section(buffer, MarkerSet::Streaming) {
        let walk = walk_bullets(section, MarkerSet::Streaming);
        in_progress = walk.open_text();
        completed = walk.completed;
    }

    SummarySnapshot {
        headline,
        completed_bullets: completed,
        in_progress,
    }
}
