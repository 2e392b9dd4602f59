use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::action::ModerationAction;
use crate::platform::{ModerationPlatform, PlatformError};

/// Platform double that records every attempted action.
#[derive(Debug, Default)]
pub(crate) struct RecordingPlatform {
    applied: Mutex<Vec<ModerationAction>>,
    failures: HashMap<&'static str, PlatformError>,
    users: HashMap<u64, String>,
    messages: HashSet<(u64, u64)>,
}

impl RecordingPlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Make every action of `kind` fail with `error`.
    pub(crate) fn failing(mut self, kind: &'static str, error: PlatformError) -> Self {
        self.failures.insert(kind, error);
        self
    }

    pub(crate) fn with_user(mut self, user_id: u64, name: &str) -> Self {
        self.users.insert(user_id, name.to_owned());
        self
    }

    pub(crate) fn with_message(mut self, channel_id: u64, message_id: u64) -> Self {
        self.messages.insert((channel_id, message_id));
        self
    }

    pub(crate) fn applied(&self) -> Vec<ModerationAction> {
        self.applied.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModerationPlatform for RecordingPlatform {
    async fn apply(&self, action: &ModerationAction) -> Result<(), PlatformError> {
        self.applied.lock().unwrap().push(action.clone());
        match self.failures.get(action.kind()) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    async fn resolve_user(&self, user_id: u64) -> Result<String, PlatformError> {
        self.users.get(&user_id).cloned().ok_or(PlatformError::NotFound)
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError> {
        if self.messages.contains(&(channel_id, message_id)) {
            Ok(())
        } else {
            Err(PlatformError::NotFound)
        }
    }
}
