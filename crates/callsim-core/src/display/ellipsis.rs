//! Animated "Please wait" text shown while connecting.

/// Text shown the moment the phone enters `Connecting`.
pub const LOADING_TEXT_INITIAL: &str = "Please wait.";

/// Cycles the dot count 1 → 2 → 3 → 1 …
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingEllipsis {
    dot_count: usize,
}

impl Default for LoadingEllipsis {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingEllipsis {
    pub const fn new() -> Self {
        Self { dot_count: 1 }
    }

    /// Text for the next animation frame.
    pub fn next_frame(&mut self) -> String {
        let text = format!("Please wait{}", ".".repeat(self.dot_count));
        self.dot_count = (self.dot_count % 3) + 1;
        text
    }
}
