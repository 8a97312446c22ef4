//! Paced reveal of summary content.
//!
//! The parser can complete bullets faster than a viewer reads them.
//! This module owns the presentation side: a character-level typewriter
//! animation per bullet and a scheduler that exposes bullets strictly
//! in order, one at a time.

mod scheduler;
mod typewriter;

#[cfg(test)]
mod tests;

pub use scheduler::RevealScheduler;
pub use typewriter::Typewriter;
