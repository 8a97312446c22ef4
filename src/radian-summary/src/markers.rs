//! Section markers and shared text helpers.
//!
//! Both parsers recognize the same two section tags, case-insensitively.
//! The finalization path additionally accepts `BULLETS:` as a synonym for
//! the list section, for compatibility with the non-streaming backend.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Semantic prefix the headline is normalized to carry.
pub(crate) const HEADLINE_LABEL: &str = "Overall Status:";

/// Glyphs that open a bullet at the start of a line.
pub(crate) const BULLET_GLYPHS: [char; 3] = ['-', '•', '*'];

static HEADLINE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)HEADLINE:").expect("valid regex"));

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)KEY POINTS:").expect("valid regex"));

static LIST_MARKER_FINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:KEY POINTS|BULLETS):").expect("valid regex"));

static NUMBERED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid regex"));

/// Which list markers a parse accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MarkerSet {
    /// Streaming path: `KEY POINTS:` only.
    Streaming,
    /// Finalization path: `KEY POINTS:` or `BULLETS:`.
    Final,
}

impl MarkerSet {
    fn list_marker(self) -> &'static Regex {
        match self {
            MarkerSet::Streaming => &LIST_MARKER,
            MarkerSet::Final => &LIST_MARKER_FINAL,
        }
    }
}

/// Extracts the raw headline text, if the marker has arrived.
///
/// Content runs from the end of the marker to the first newline or the
/// start of the list section (as recognized by `markers`), whichever
/// comes first. The result is trimmed and may be empty (marker present,
/// text not yet streamed).
pub(crate) fn extract_headline(buffer: &str, markers: MarkerSet) -> Option<String> {
    let m = HEADLINE_MARKER.find(buffer)?;
    let rest = &buffer[m.end()..];

    let mut end = rest.len();
    if let Some(nl) = rest.find('\n') {
        end = nl;
    }
    if let Some(list) = markers.list_marker().find(rest) {
        end = end.min(list.start());
    }
    Some(rest[..end].trim().to_string())
}

/// Prepends the semantic label unless the text already carries it.
pub(crate) fn normalize_headline(text: &str) -> String {
    if text.starts_with(HEADLINE_LABEL) {
        text.to_string()
    } else {
        format!("{HEADLINE_LABEL} {text}")
    }
}

/// Returns the bullet-list section: everything after the list marker.
pub(crate) fn bullet_section(buffer: &str, markers: MarkerSet) -> Option<&str> {
    let m = markers.list_marker().find(buffer)?;
    Some(&buffer[m.end()..])
}

/// Strips a leading bullet glyph, returning the rest of the line.
pub(crate) fn strip_glyph(line: &str) -> Option<&str> {
    for glyph in BULLET_GLYPHS {
        if let Some(rest) = line.strip_prefix(glyph) {
            return Some(rest.trim_start());
        }
    }
    None
}

/// Strips a leading `N.` numbered marker, returning the rest of the line.
pub(crate) fn strip_numbered(line: &str) -> Option<&str> {
    NUMBERED.find(line).map(|m| &line[m.end()..])
}

/// Collapses runs of whitespace to a single space and trims the ends.
pub(crate) fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Result of walking a bullet section with the open-accumulator rule.
pub(crate) struct BulletWalk {
    /// Bullets closed by a subsequent marker, in order.
    pub(crate) completed: Vec<String>,
    /// Collapsed line fragments of the still-open bullet.
    pub(crate) open: Vec<String>,
    /// Whether the open bullet was started by a marker line.
    pub(crate) open_marked: bool,
}

impl BulletWalk {
    /// Joins the open fragments into one bullet text.
    pub(crate) fn open_text(&self) -> String {
        collapse_ws(&self.open.join(" "))
    }
}

/// Walks a bullet section line by line with an open accumulator.
///
/// A marker line closes the open bullet and starts a new one; an
/// unmarked line joins the open bullet as a wrapped continuation, or
/// starts an implicit bullet when nothing is open. Shared by both
/// parsers; only the final accumulator's closure policy differs between
/// them.
///
/// Numbered (`N.`) lines count as markers everywhere under
/// [`MarkerSet::Final`]; under [`MarkerSet::Streaming`] the numbered
/// prefix is stripped only when it opens a bullet into an empty
/// accumulator, and otherwise joins as continuation text.
pub(crate) fn walk_bullets(section: &str, markers: MarkerSet) -> BulletWalk {
    let mut completed: Vec<String> = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut open_marked = false;

    for line in section.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = strip_glyph(line) {
            close_open(&mut completed, &mut open);
            open.push(collapse_ws(rest));
            open_marked = true;
        } else if markers == MarkerSet::Final && strip_numbered(line).is_some() {
            let rest = strip_numbered(line).unwrap_or(line);
            close_open(&mut completed, &mut open);
            open.push(collapse_ws(rest));
            open_marked = true;
        } else if open.is_empty() {
            open.push(collapse_ws(strip_numbered(line).unwrap_or(line)));
            open_marked = false;
        } else {
            open.push(collapse_ws(line));
        }
    }

    BulletWalk {
        completed,
        open,
        open_marked,
    }
}

/// Closes the open accumulator into a completed bullet, if it holds text.
fn close_open(completed: &mut Vec<String>, open: &mut Vec<String>) {
    if open.is_empty() {
        return;
    }
    let text = collapse_ws(&open.join(" "));
    open.clear();
    if !text.is_empty() {
        completed.push(text);
    }
}
