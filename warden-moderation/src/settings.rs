use std::time::Duration;

pub const DEFAULT_SPAM_THRESHOLD: usize = 3;
pub const DEFAULT_SPAM_WINDOW: Duration = Duration::from_secs(5);
pub const DEFAULT_SPAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Tunables for the automatic moderation pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModerationSettings {
    /// Messages tolerated inside one window; one more trips the detector.
    pub spam_threshold: usize,
    pub spam_window: Duration,
    pub spam_timeout: Duration,
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            spam_threshold: DEFAULT_SPAM_THRESHOLD,
            spam_window: DEFAULT_SPAM_WINDOW,
            spam_timeout: DEFAULT_SPAM_TIMEOUT,
        }
    }
}
