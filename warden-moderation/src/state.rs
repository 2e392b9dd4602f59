use std::sync::Arc;

use crate::autorole::AutoRoleStore;
use crate::settings::ModerationSettings;
use crate::spam::SpamDetector;

/// In-memory moderation state shared by the event queue and commands.
#[derive(Clone, Debug)]
pub struct ModerationState {
    settings: ModerationSettings,
    autoroles: Arc<AutoRoleStore>,
    spam: Arc<SpamDetector>,
}

impl ModerationState {
    pub fn new(settings: ModerationSettings) -> Self {
        Self {
            settings,
            autoroles: Arc::new(AutoRoleStore::new()),
            spam: Arc::new(SpamDetector::from_settings(&settings)),
        }
    }

    pub fn settings(&self) -> &ModerationSettings {
        &self.settings
    }

    pub fn autoroles(&self) -> &AutoRoleStore {
        &self.autoroles
    }

    pub fn spam(&self) -> &SpamDetector {
        &self.spam
    }
}

impl Default for ModerationState {
    fn default() -> Self {
        Self::new(ModerationSettings::default())
    }
}
