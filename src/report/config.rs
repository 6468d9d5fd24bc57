/// Column width used when none is configured.
pub const DEFAULT_COLUMN_WIDTH: usize = 20;

/// Presentation settings for the text reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Every field is left-justified and padded to this many characters.
    /// Longer values are never truncated.
    pub column_width: usize,
}

impl ReportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            column_width: DEFAULT_COLUMN_WIDTH,
        }
    }
}
