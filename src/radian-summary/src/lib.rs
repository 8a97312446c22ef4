//! Structure parsers for streamed clinical summary text.
//!
//! The upstream generator emits a semi-structured summary:
//!
//! ```text
//! HEADLINE: <single-line text>
//! KEY POINTS:
//! - <bullet text, may wrap multiple lines>
//! - <bullet text>
//! ```
//!
//! This crate interprets that format twice:
//!
//! - [`parse_incremental`] runs while the buffer is still growing and
//!   produces a best-effort [`SummarySnapshot`] (completed bullets plus
//!   the still-open tail bullet).
//! - [`parse_final`] runs once, on the complete buffer, and produces the
//!   authoritative [`FinalSummary`] with stricter boundary handling and a
//!   fallback that guarantees a non-empty result for non-empty input.
//!
//! Both parsers are total functions over strings: malformed input
//! degrades to empty or partial structures, never to an error.

mod markers;

pub mod finalize;
pub mod incremental;
pub mod types;

pub use finalize::parse_final;
pub use incremental::parse_incremental;
pub use types::{FinalSummary, SummarySnapshot};
