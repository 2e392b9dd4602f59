use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::sync::Mutex;

use crate::settings::ModerationSettings;

/// Sliding-window message counter keyed by user.
///
/// Windows are global per user, not per guild. Each window only holds
/// timestamps (unix millis) inside the trailing window of the latest event.
#[derive(Debug)]
pub struct SpamDetector {
    windows: Mutex<HashMap<u64, VecDeque<u64>>>,
    window_millis: u64,
    threshold: usize,
}

impl SpamDetector {
    pub fn new(window: Duration, threshold: usize) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            window_millis: u64::try_from(window.as_millis()).unwrap_or(u64::MAX),
            threshold,
        }
    }

    pub fn from_settings(settings: &ModerationSettings) -> Self {
        Self::new(settings.spam_window, settings.spam_threshold)
    }

    /// Record one message and report whether the user is over the threshold.
    ///
    /// The event is recorded regardless of the verdict. Entries exactly one
    /// window old are still counted.
    pub async fn should_throttle(&self, user_id: u64, timestamp_millis: u64) -> bool {
        let mut windows = self.windows.lock().await;
        let window = windows.entry(user_id).or_default();

        window.push_back(timestamp_millis);
        window.retain(|seen| timestamp_millis.saturating_sub(*seen) <= self.window_millis);

        window.len() > self.threshold
    }

    /// Number of timestamps currently held for a user.
    pub async fn window_len(&self, user_id: u64) -> usize {
        self.windows
            .lock()
            .await
            .get(&user_id)
            .map_or(0, VecDeque::len)
    }

    pub async fn tracked_users(&self) -> usize {
        self.windows.lock().await.len()
    }
}

impl Default for SpamDetector {
    fn default() -> Self {
        Self::from_settings(&ModerationSettings::default())
    }
}
