use std::time::Duration;

/// Braille-dot animation frames for the loading placeholder.
const FRAMES: [&str; 8] = ["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

pub const THINKING_LABEL: &str = "Llama is thinking";

/// One-shot tick interval while a request is outstanding.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Frame counter for the loading animation. Holds no transcript reference;
/// it only supplies the next glyph.
#[derive(Debug, Default, Clone)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn frame(&self) -> &'static str {
        FRAMES[self.frame]
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    /// The placeholder text rendered into the transcript.
    pub fn thinking_line(&self) -> String {
        format!("{} {}", self.frame(), THINKING_LABEL)
    }
}
