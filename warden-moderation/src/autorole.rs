use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::debug;

/// Role handed to new members, one per guild. Lives for the process only.
#[derive(Debug, Default)]
pub struct AutoRoleStore {
    roles: RwLock<HashMap<u64, u64>>,
}

impl AutoRoleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the auto-role for a guild, replacing any previous one.
    pub async fn set(&self, guild_id: u64, role_id: u64) {
        let previous = self.roles.write().await.insert(guild_id, role_id);
        debug!(guild_id, role_id, ?previous, "auto-role updated");
    }

    pub async fn get(&self, guild_id: u64) -> Option<u64> {
        self.roles.read().await.get(&guild_id).copied()
    }
}
