//! Streaming session state and reveal scheduling for Radian summaries.
//!
//! A clinical summary arrives as an ordered stream of text fragments.
//! This crate owns everything between the transport and the screen:
//!
//! - [`source`]: chunk-source events, an mpsc-backed event stream, and
//!   UTF-8 reassembly for transports that split code points across
//!   frames.
//! - [`reveal`]: the scheduler that decouples "parsed" from "shown".
//!   Bullets are exposed to the viewer one at a time, in order, each
//!   behind a character-reveal animation, regardless of how fast the
//!   underlying text streamed in.
//! - [`session`]: per-subject session state, covering the append-only
//!   buffer, throttled incremental re-parsing, terminal transitions,
//!   and the read-only projection the presentation layer consumes.
//!
//! Scheduling is single-threaded and cooperative: chunk arrivals and
//! animation frames are events on one logical timeline, driven either
//! by the caller ticking manually or by [`session::drive`].

pub mod config;
pub mod reveal;
pub mod session;
pub mod source;

pub use config::RevealConfig;
pub use reveal::{RevealScheduler, Typewriter};
pub use session::{drive, SessionError, SummaryProjection, SummarySession};
pub use source::{ChunkEvent, ChunkStream, Utf8ChunkBuffer};
