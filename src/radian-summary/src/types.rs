//! Parsed-result value types.

use serde::{Deserialize, Serialize};

/// Best-effort parse of a still-growing summary buffer.
///
/// `completed_bullets` is prefix-stable: re-parsing a longer buffer that
/// extends a previous one never alters or removes a bullet already
/// reported here, it can only append new ones. `in_progress` is the open
/// tail bullet and may keep changing until a later marker closes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummarySnapshot {
    /// Normalized headline, or empty if the marker has not arrived yet.
    pub headline: String,
    /// Bullets closed by a subsequent bullet marker, in order.
    pub completed_bullets: Vec<String>,
    /// The still-open tail bullet; empty when no bullet is open.
    pub in_progress: String,
}

impl SummarySnapshot {
    /// Returns `true` if nothing has been extracted yet.
    pub fn is_empty(&self) -> bool {
        self.headline.is_empty() && self.completed_bullets.is_empty() && self.in_progress.is_empty()
    }
}

/// Authoritative parse of a completed summary buffer.
///
/// Produced once per session, after the chunk source signals completion.
/// Unlike [`SummarySnapshot`] there is no open tail: trailing unmarked
/// content is either retained as a final bullet or dropped as a
/// duplicate fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalSummary {
    /// Normalized headline.
    pub headline: String,
    /// All bullets, in order.
    pub bullets: Vec<String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_snapshot_serde_round_trip() {
        let snap = SummarySnapshot {
            headline: "Overall Status: Stable".to_string(),
            completed_bullets: vec!["Vitals normal".to_string()],
            in_progress: "Labs".to_string(),
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: SummarySnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_snapshot_is_empty() {
        assert!(SummarySnapshot::default().is_empty());
        let snap = SummarySnapshot {
            in_progress: "x".to_string(),
            ..Default::default()
        };
        assert!(!snap.is_empty());
    }
}
