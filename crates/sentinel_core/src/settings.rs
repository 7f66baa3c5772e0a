/// Smallest accepted history capacity.
pub const HISTORY_COUNT_MIN: usize = 1;
/// Largest accepted history capacity.
pub const HISTORY_COUNT_MAX: usize = 50;

const DEFAULT_HISTORY_COUNT: usize = 5;

/// User-facing settings. Only `history_count` affects the coordinator;
/// the render flags are passed through to the presentation collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub history_count: usize,
    pub render_markdown: bool,
    pub show_frontmatter: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history_count: DEFAULT_HISTORY_COUNT,
            render_markdown: true,
            show_frontmatter: true,
        }
    }
}

impl Settings {
    /// Returns the settings with `history_count` clamped to the accepted range.
    pub fn clamped(mut self) -> Self {
        self.history_count = self
            .history_count
            .clamp(HISTORY_COUNT_MIN, HISTORY_COUNT_MAX);
        self
    }
}
