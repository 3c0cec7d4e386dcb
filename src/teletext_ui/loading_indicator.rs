//! Spinner shown while the active query is pending

/// Simple ASCII loading indicator with rotating animation
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    frame: usize,
}

const FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    /// Gets the current animation frame character
    pub fn current_frame(&self) -> &'static str {
        FRAMES[self.frame]
    }

    /// Advances to the next animation frame
    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % FRAMES.len();
    }

    pub fn reset(&mut self) {
        self.frame = 0;
    }
}
