/// One platform-level effect requested by the moderation pipeline.
///
/// Ids are raw snowflakes so this crate stays independent of the gateway
/// library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModerationAction {
    DeleteMessage {
        channel_id: u64,
        message_id: u64,
    },
    Timeout {
        guild_id: u64,
        user_id: u64,
        seconds: u64,
        reason: String,
    },
    Kick {
        guild_id: u64,
        user_id: u64,
        reason: String,
    },
    Ban {
        guild_id: u64,
        user_id: u64,
        reason: String,
    },
    Unban {
        guild_id: u64,
        user_id: u64,
    },
    MoveMember {
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
    },
    AddRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
    },
    /// Delete the latest `limit` messages of a channel.
    PurgeChannel {
        channel_id: u64,
        limit: u64,
    },
}

impl ModerationAction {
    /// Stable short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DeleteMessage { .. } => "delete_message",
            Self::Timeout { .. } => "timeout",
            Self::Kick { .. } => "kick",
            Self::Ban { .. } => "ban",
            Self::Unban { .. } => "unban",
            Self::MoveMember { .. } => "move_member",
            Self::AddRole { .. } => "add_role",
            Self::PurgeChannel { .. } => "purge_channel",
        }
    }
}

/// What to do when a planned action fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effort {
    /// Failures are logged.
    Reported,
    /// Failures are discarded.
    BestEffort,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedAction {
    pub action: ModerationAction,
    pub effort: Effort,
}

impl PlannedAction {
    pub fn reported(action: ModerationAction) -> Self {
        Self {
            action,
            effort: Effort::Reported,
        }
    }

    pub fn best_effort(action: ModerationAction) -> Self {
        Self {
            action,
            effort: Effort::BestEffort,
        }
    }
}
