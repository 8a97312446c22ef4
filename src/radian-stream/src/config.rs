//! Reveal and session tuning.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the reveal scheduler and session throttling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Characters revealed per second during bullet/headline animation.
    #[serde(default = "default_chars_per_second")]
    pub chars_per_second: f32,
    /// Pause between revealing successive bullets, in milliseconds.
    #[serde(default = "default_bullet_pacing_ms")]
    pub bullet_pacing_ms: u64,
    /// Minimum buffer growth (bytes) before the session re-parses.
    #[serde(default = "default_reparse_min_growth")]
    pub reparse_min_growth: usize,
    /// Animation frames per second the scheduler is ticked at.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f32,
}

fn default_chars_per_second() -> f32 {
    60.0
}

fn default_bullet_pacing_ms() -> u64 {
    250
}

fn default_reparse_min_growth() -> usize {
    16
}

fn default_frame_rate() -> f32 {
    60.0
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            chars_per_second: default_chars_per_second(),
            bullet_pacing_ms: default_bullet_pacing_ms(),
            reparse_min_growth: default_reparse_min_growth(),
            frame_rate: default_frame_rate(),
        }
    }
}

impl RevealConfig {
    /// Characters revealed per animation frame.
    pub(crate) fn chars_per_frame(&self) -> f32 {
        self.chars_per_second / self.frame_rate.max(1.0)
    }

    /// Bullet pacing delay expressed in whole frames.
    pub(crate) fn pacing_frames(&self) -> u32 {
        let frames = self.bullet_pacing_ms as f32 / 1000.0 * self.frame_rate.max(1.0);
        frames.round() as u32
    }

    /// Wall-clock duration of one animation frame.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f32(1.0 / self.frame_rate.max(1.0))
    }
}
