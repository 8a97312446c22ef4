//! Fixed-rate character reveal.

/// Reveals text character by character at a fixed rate.
///
/// Fractional characters accumulate across frames, so any rate works at
/// any frame cadence. The text may keep growing while the animation
/// runs: [`Typewriter::update`] extends the animation in place when the
/// new text extends the old one, and restarts it otherwise.
#[derive(Debug, Clone)]
pub struct Typewriter {
    text: String,
    visible_chars: usize,
    chars_per_frame: f32,
    accumulator: f32,
}

impl Typewriter {
    /// Creates an empty typewriter at the given per-frame rate.
    pub fn new(chars_per_frame: f32) -> Self {
        Self {
            text: String::new(),
            visible_chars: 0,
            chars_per_frame,
            accumulator: 0.0,
        }
    }

    /// Creates a typewriter mid-animation, carrying progress over from a
    /// previous reveal of a prefix of `text`.
    pub fn with_progress(text: String, visible_chars: usize, chars_per_frame: f32) -> Self {
        let total = text.chars().count();
        Self {
            text,
            visible_chars: visible_chars.min(total),
            chars_per_frame,
            accumulator: 0.0,
        }
    }

    /// Replaces or extends the text being revealed.
    ///
    /// If `text` extends the current text the animation continues from
    /// where it is; otherwise it restarts from the beginning.
    pub fn update(&mut self, text: &str) {
        if text == self.text {
            return;
        }
        if text.starts_with(&self.text) {
            self.text = text.to_string();
        } else {
            self.text = text.to_string();
            self.visible_chars = 0;
            self.accumulator = 0.0;
        }
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self) {
        let total = self.total_chars();
        if self.visible_chars >= total {
            return;
        }
        self.accumulator += self.chars_per_frame;
        while self.accumulator >= 1.0 && self.visible_chars < total {
            self.accumulator -= 1.0;
            self.visible_chars += 1;
        }
        if self.visible_chars >= total {
            self.accumulator = 0.0;
        }
    }

    /// Reveals everything immediately.
    pub fn skip_to_end(&mut self) {
        self.visible_chars = self.total_chars();
        self.accumulator = 0.0;
    }

    /// Returns the currently visible portion of the text.
    pub fn visible_text(&self) -> &str {
        let byte_index = self
            .text
            .char_indices()
            .nth(self.visible_chars)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());
        &self.text[..byte_index]
    }

    /// Returns the full text, including the unrevealed portion.
    pub fn full_text(&self) -> &str {
        &self.text
    }

    /// Returns `true` once every character is visible.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.visible_chars >= self.total_chars()
    }

    /// Number of currently visible characters.
    #[inline]
    pub fn visible_char_count(&self) -> usize {
        self.visible_chars
    }

    /// Total character count.
    pub fn total_chars(&self) -> usize {
        self.text.chars().count()
    }
}
