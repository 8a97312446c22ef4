//! Finalization parser for a completed buffer.

use crate::markers::{
    bullet_section, collapse_ws, extract_headline, normalize_headline, strip_glyph,
    strip_numbered, walk_bullets, MarkerSet,
};
use crate::types::FinalSummary;

/// Headline used when the completed buffer never produced one.
const DEFAULT_HEADLINE: &str = "Overall Status: Clinical Update";

/// Parses the authoritative summary out of the complete buffer.
///
/// Runs the same open-accumulator walk as the incremental parser
/// (wrapped continuation lines join their bullet), then closes the
/// final accumulator as a bullet instead of reporting it in progress.
/// The last line of the section, when unmarked (the model stopped
/// mid-bullet), is a suspect fragment: it is dropped when a previously
/// closed bullet already contains it (or it contains one), the
/// duplicate-stutter case.
///
/// When the section yields nothing at all, a fallback ladder guarantees
/// a non-empty result for any non-empty buffer: marker-prefixed lines
/// anywhere in the buffer, then every content line, then the whole
/// trimmed buffer as a single bullet.
pub fn parse_final(buffer: &str) -> FinalSummary {
    let headline = match extract_headline(buffer, MarkerSet::Final) {
        Some(text) if !text.is_empty() => normalize_headline(&text),
        _ => DEFAULT_HEADLINE.to_string(),
    };

    let mut bullets: Vec<String> = Vec::new();

    if let Some(section) = bullet_section(buffer, MarkerSet::Final) {
        let mut walk = walk_bullets(section, MarkerSet::Final);
        bullets = std::mem::take(&mut walk.completed);

        let ends_unmarked = walk.open.len() > 1 || (!walk.open.is_empty() && !walk.open_marked);
        if ends_unmarked {
            if let Some(last) = walk.open.last() {
                let duplicate = !last.is_empty()
                    && bullets
                        .iter()
                        .any(|b| b.contains(last.as_str()) || last.contains(b.as_str()));
                if duplicate {
                    walk.open.pop();
                }
            }
        }

        let tail = walk.open_text();
        if !tail.is_empty() {
            bullets.push(tail);
        }
    }

    if bullets.is_empty() {
        bullets = fallback_bullets(buffer);
    }

    FinalSummary { headline, bullets }
}

/// A marker in the final parse: a glyph, or a numbered marker anywhere.
///
/// The incremental parser only honors numbered markers for the first
/// item; the original non-streaming parser stripped digits on every
/// line, and finalization follows that behavior.
fn strip_marker(line: &str) -> Option<&str> {
    strip_glyph(line).or_else(|| strip_numbered(line))
}

/// Recovery ladder for buffers whose bullet section yielded nothing.
fn fallback_bullets(buffer: &str) -> Vec<String> {
    // Marker-prefixed lines anywhere in the buffer.
    let marked: Vec<String> = buffer
        .lines()
        .map(str::trim)
        .filter_map(strip_marker)
        .map(collapse_ws)
        .filter(|text| !text.is_empty())
        .collect();
    if !marked.is_empty() {
        return marked;
    }

    // Every content line that is not a section tag.
    let content: Vec<String> = buffer
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_tag_line(line))
        .map(collapse_ws)
        .collect();
    if !content.is_empty() {
        return content;
    }

    // The whole trimmed buffer as a single bullet.
    let whole = collapse_ws(buffer);
    if whole.is_empty() {
        Vec::new()
    } else {
        vec![whole]
    }
}

/// Returns `true` for lines that only carry a section tag.
fn is_tag_line(line: &str) -> bool {
    let upper = line.to_uppercase();
    upper.starts_with("HEADLINE:") || upper == "KEY POINTS:" || upper == "BULLETS:"
}
