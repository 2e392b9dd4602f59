use tracing::{error, info, warn};

use warden_utils::formatting::{escape_mentions, format_compact_duration, user_mention};
use warden_utils::parse::{parse_duration_seconds, parse_snowflake};

use crate::action::ModerationAction;
use crate::platform::{ModerationPlatform, PlatformError};
use crate::state::ModerationState;

pub const DEFAULT_REASON: &str = "No reason";
pub const INVALID_DURATION_MESSAGE: &str = "Invalid duration format. Use 1d, 10min, 1y, etc.";
pub const INVALID_USER_ID_MESSAGE: &str = "Invalid user ID.";
pub const DELETE_FAILED_MESSAGE: &str = "Could not delete message.";
pub const DELETE_SUCCEEDED_MESSAGE: &str = "Message deleted.";
pub const ZERO_AMOUNT_MESSAGE: &str = "Amount must be at least 1.";

/// An administrator command with every reference already resolved to ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModerationCommand {
    SetAutorole {
        guild_id: u64,
        role_id: u64,
        role_name: String,
    },
    GiveRole {
        guild_id: u64,
        user_id: u64,
        role_id: u64,
        role_name: String,
    },
    Kick {
        guild_id: u64,
        user_id: u64,
        reason: Option<String>,
    },
    Ban {
        guild_id: u64,
        user_id: u64,
        reason: Option<String>,
    },
    Unban {
        guild_id: u64,
        raw_user_id: String,
    },
    Timeout {
        guild_id: u64,
        user_id: u64,
        duration: String,
        reason: Option<String>,
    },
    Clear {
        channel_id: u64,
        amount: u64,
    },
    Move {
        guild_id: u64,
        user_id: u64,
        channel_id: u64,
        channel_name: String,
    },
    DeleteMessage {
        channel_id: u64,
        raw_message_id: String,
    },
}

impl ModerationCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetAutorole { .. } => "set-autorole",
            Self::GiveRole { .. } => "give-role",
            Self::Kick { .. } => "kick",
            Self::Ban { .. } => "ban",
            Self::Unban { .. } => "unban",
            Self::Timeout { .. } => "timeout",
            Self::Clear { .. } => "clear",
            Self::Move { .. } => "move",
            Self::DeleteMessage { .. } => "delete-msg",
        }
    }
}

/// Short reply shown only to the invoking administrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Acknowledgment(String);

impl Acknowledgment {
    pub fn new(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn content(&self) -> &str {
        &self.0
    }

    pub fn into_content(self) -> String {
        self.0
    }
}

/// Runs administrator commands against the shared state and the platform.
pub struct CommandExecutor<'a, P: ?Sized> {
    state: &'a ModerationState,
    platform: &'a P,
}

impl<'a, P> CommandExecutor<'a, P>
where
    P: ModerationPlatform + ?Sized,
{
    pub fn new(state: &'a ModerationState, platform: &'a P) -> Self {
        Self { state, platform }
    }

    pub async fn execute(&self, command: ModerationCommand) -> Acknowledgment {
        let name = command.name();
        let ack = match command {
            ModerationCommand::SetAutorole {
                guild_id,
                role_id,
                role_name,
            } => {
                self.state.autoroles().set(guild_id, role_id).await;
                Acknowledgment::new(format!("Auto-role set to {}", escape_mentions(&role_name)))
            }
            ModerationCommand::GiveRole {
                guild_id,
                user_id,
                role_id,
                role_name,
            } => {
                let action = ModerationAction::AddRole {
                    guild_id,
                    user_id,
                    role_id,
                };
                let target = user_mention(user_id);
                match self.platform.apply(&action).await {
                    Ok(()) => Acknowledgment::new(format!(
                        "Gave {} to {}",
                        escape_mentions(&role_name),
                        target
                    )),
                    Err(source) => surfaced(name, "give a role to", &target, source),
                }
            }
            ModerationCommand::Kick {
                guild_id,
                user_id,
                reason,
            } => {
                let action = ModerationAction::Kick {
                    guild_id,
                    user_id,
                    reason: reason_or_default(reason),
                };
                self.simple(name, &action, "kick", "Kicked", user_id).await
            }
            ModerationCommand::Ban {
                guild_id,
                user_id,
                reason,
            } => {
                let action = ModerationAction::Ban {
                    guild_id,
                    user_id,
                    reason: reason_or_default(reason),
                };
                self.simple(name, &action, "ban", "Banned", user_id).await
            }
            ModerationCommand::Unban {
                guild_id,
                raw_user_id,
            } => self.unban(guild_id, &raw_user_id).await,
            ModerationCommand::Timeout {
                guild_id,
                user_id,
                duration,
                reason,
            } => self.timeout(guild_id, user_id, &duration, reason).await,
            ModerationCommand::Clear { channel_id, amount } => {
                if amount == 0 {
                    return Acknowledgment::new(ZERO_AMOUNT_MESSAGE);
                }

                let action = ModerationAction::PurgeChannel {
                    channel_id,
                    limit: amount,
                };
                match self.platform.apply(&action).await {
                    Ok(()) => Acknowledgment::new(format!("Deleted {} messages", amount)),
                    Err(source) => surfaced(name, "delete messages in", "this channel", source),
                }
            }
            ModerationCommand::Move {
                guild_id,
                user_id,
                channel_id,
                channel_name,
            } => {
                let action = ModerationAction::MoveMember {
                    guild_id,
                    user_id,
                    channel_id,
                };
                let target = user_mention(user_id);
                match self.platform.apply(&action).await {
                    Ok(()) => Acknowledgment::new(format!(
                        "Moved {} to {}",
                        target,
                        escape_mentions(&channel_name)
                    )),
                    Err(source) => surfaced(name, "move", &target, source),
                }
            }
            ModerationCommand::DeleteMessage {
                channel_id,
                raw_message_id,
            } => self.delete_message(channel_id, &raw_message_id).await,
        };

        info!(command = name, "moderation command handled");
        ack
    }

    async fn simple(
        &self,
        name: &'static str,
        action: &ModerationAction,
        verb: &str,
        past_tense: &str,
        user_id: u64,
    ) -> Acknowledgment {
        let target = user_mention(user_id);
        match self.platform.apply(action).await {
            Ok(()) => Acknowledgment::new(format!("{} {}", past_tense, target)),
            Err(source) => surfaced(name, verb, &target, source),
        }
    }

    async fn unban(&self, guild_id: u64, raw_user_id: &str) -> Acknowledgment {
        let Some(user_id) = parse_snowflake(raw_user_id) else {
            return Acknowledgment::new(INVALID_USER_ID_MESSAGE);
        };
        let target = user_mention(user_id);

        let display_name = match self.platform.resolve_user(user_id).await {
            Ok(display_name) => display_name,
            Err(source) => return surfaced("unban", "find", &target, source),
        };

        let action = ModerationAction::Unban { guild_id, user_id };
        match self.platform.apply(&action).await {
            Ok(()) => {
                info!(guild_id, user_id, %display_name, "user unbanned");
                Acknowledgment::new(format!("Unbanned {}", target))
            }
            Err(source) => surfaced("unban", "unban", &target, source),
        }
    }

    async fn timeout(
        &self,
        guild_id: u64,
        user_id: u64,
        duration: &str,
        reason: Option<String>,
    ) -> Acknowledgment {
        let seconds = match parse_duration_seconds(duration) {
            Some(seconds) if seconds > 0 => seconds,
            _ => return Acknowledgment::new(INVALID_DURATION_MESSAGE),
        };

        let action = ModerationAction::Timeout {
            guild_id,
            user_id,
            seconds,
            reason: reason_or_default(reason),
        };
        let target = user_mention(user_id);
        match self.platform.apply(&action).await {
            Ok(()) => Acknowledgment::new(format!(
                "Timed out {} for {}",
                target,
                format_compact_duration(seconds)
            )),
            Err(source) => surfaced("timeout", "timeout", &target, source),
        }
    }

    async fn delete_message(&self, channel_id: u64, raw_message_id: &str) -> Acknowledgment {
        let Some(message_id) = parse_snowflake(raw_message_id) else {
            return Acknowledgment::new(DELETE_FAILED_MESSAGE);
        };

        let result = match self.platform.fetch_message(channel_id, message_id).await {
            Ok(()) => {
                self.platform
                    .apply(&ModerationAction::DeleteMessage {
                        channel_id,
                        message_id,
                    })
                    .await
            }
            Err(source) => Err(source),
        };

        match result {
            Ok(()) => Acknowledgment::new(DELETE_SUCCEEDED_MESSAGE),
            Err(source) => {
                warn!(?source, channel_id, message_id, "delete-msg failed");
                Acknowledgment::new(DELETE_FAILED_MESSAGE)
            }
        }
    }
}

fn reason_or_default(reason: Option<String>) -> String {
    reason
        .map(|reason| reason.trim().to_owned())
        .filter(|reason| !reason.is_empty())
        .unwrap_or_else(|| DEFAULT_REASON.to_owned())
}

fn surfaced(command: &str, verb: &str, target: &str, source: PlatformError) -> Acknowledgment {
    if source.is_missing_permissions() {
        warn!(command, "missing permissions for moderation command");
    } else {
        error!(?source, command, "moderation command request failed");
    }

    Acknowledgment::new(format!("Couldn't {} {}: {}", verb, target, source))
}

#[cfg(test)]
mod tests {
    use super::{
        CommandExecutor, DEFAULT_REASON, DELETE_FAILED_MESSAGE, DELETE_SUCCEEDED_MESSAGE,
        INVALID_DURATION_MESSAGE, INVALID_USER_ID_MESSAGE, ModerationCommand, ZERO_AMOUNT_MESSAGE,
    };
    use crate::action::ModerationAction;
    use crate::platform::PlatformError;
    use crate::state::ModerationState;
    use crate::testing::RecordingPlatform;

    const GUILD: u64 = 11;
    const USER: u64 = 22;
    const CHANNEL: u64 = 33;

    #[tokio::test]
    async fn set_autorole_updates_store_without_platform_calls() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::SetAutorole {
                guild_id: GUILD,
                role_id: 44,
                role_name: "Newcomer".to_owned(),
            })
            .await;

        assert_eq!(ack.content(), "Auto-role set to Newcomer");
        assert_eq!(state.autoroles().get(GUILD).await, Some(44));
        assert!(platform.applied().is_empty());
    }

    #[tokio::test]
    async fn give_role_adds_role() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::GiveRole {
                guild_id: GUILD,
                user_id: USER,
                role_id: 44,
                role_name: "Helper".to_owned(),
            })
            .await;

        assert_eq!(ack.content(), "Gave Helper to <@22>");
        assert_eq!(
            platform.applied(),
            vec![ModerationAction::AddRole {
                guild_id: GUILD,
                user_id: USER,
                role_id: 44,
            }]
        );
    }

    #[tokio::test]
    async fn kick_uses_default_reason() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Kick {
                guild_id: GUILD,
                user_id: USER,
                reason: None,
            })
            .await;

        assert_eq!(ack.content(), "Kicked <@22>");
        assert_eq!(
            platform.applied(),
            vec![ModerationAction::Kick {
                guild_id: GUILD,
                user_id: USER,
                reason: DEFAULT_REASON.to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn ban_failure_is_surfaced() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new().failing("ban", PlatformError::MissingPermissions);
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Ban {
                guild_id: GUILD,
                user_id: USER,
                reason: Some("raiding".to_owned()),
            })
            .await;

        assert_eq!(ack.content(), "Couldn't ban <@22>: missing permissions");
    }

    #[tokio::test]
    async fn invalid_duration_issues_no_timeout() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        for duration in ["abc", "3x", "", "0d"] {
            let ack = executor
                .execute(ModerationCommand::Timeout {
                    guild_id: GUILD,
                    user_id: USER,
                    duration: duration.to_owned(),
                    reason: Some("spam".to_owned()),
                })
                .await;
            assert_eq!(ack.content(), INVALID_DURATION_MESSAGE);
        }

        assert!(platform.applied().is_empty());
    }

    #[tokio::test]
    async fn timeout_applies_parsed_duration() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Timeout {
                guild_id: GUILD,
                user_id: USER,
                duration: "10min".to_owned(),
                reason: None,
            })
            .await;

        assert_eq!(ack.content(), "Timed out <@22> for 10m");
        assert_eq!(
            platform.applied(),
            vec![ModerationAction::Timeout {
                guild_id: GUILD,
                user_id: USER,
                seconds: 600,
                reason: DEFAULT_REASON.to_owned(),
            }]
        );
    }

    #[tokio::test]
    async fn unban_rejects_non_numeric_ids() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Unban {
                guild_id: GUILD,
                raw_user_id: "someone".to_owned(),
            })
            .await;

        assert_eq!(ack.content(), INVALID_USER_ID_MESSAGE);
        assert!(platform.applied().is_empty());
    }

    #[tokio::test]
    async fn unban_resolves_user_first() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new().with_user(USER, "casey");
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Unban {
                guild_id: GUILD,
                raw_user_id: "22".to_owned(),
            })
            .await;
        assert_eq!(ack.content(), "Unbanned <@22>");
        assert_eq!(
            platform.applied(),
            vec![ModerationAction::Unban {
                guild_id: GUILD,
                user_id: USER,
            }]
        );

        let ack = executor
            .execute(ModerationCommand::Unban {
                guild_id: GUILD,
                raw_user_id: "23".to_owned(),
            })
            .await;
        assert_eq!(ack.content(), "Couldn't find <@23>: not found");
        assert_eq!(platform.applied().len(), 1);
    }

    #[tokio::test]
    async fn clear_purges_requested_amount() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Clear {
                channel_id: CHANNEL,
                amount: 5,
            })
            .await;

        assert_eq!(ack.content(), "Deleted 5 messages");
        assert_eq!(
            platform.applied(),
            vec![ModerationAction::PurgeChannel {
                channel_id: CHANNEL,
                limit: 5,
            }]
        );
    }

    #[tokio::test]
    async fn clear_rejects_zero() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Clear {
                channel_id: CHANNEL,
                amount: 0,
            })
            .await;

        assert_eq!(ack.content(), ZERO_AMOUNT_MESSAGE);
        assert!(platform.applied().is_empty());
    }

    #[tokio::test]
    async fn move_reports_channel_name() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new();
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::Move {
                guild_id: GUILD,
                user_id: USER,
                channel_id: 77,
                channel_name: "Lounge".to_owned(),
            })
            .await;

        assert_eq!(ack.content(), "Moved <@22> to Lounge");
    }

    #[tokio::test]
    async fn delete_msg_collapses_every_failure() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new()
            .with_message(CHANNEL, 900)
            .with_message(CHANNEL, 901)
            .failing("delete_message", PlatformError::MissingPermissions);
        let executor = CommandExecutor::new(&state, &platform);

        for raw in ["not-a-number", "404", "900"] {
            let ack = executor
                .execute(ModerationCommand::DeleteMessage {
                    channel_id: CHANNEL,
                    raw_message_id: raw.to_owned(),
                })
                .await;
            assert_eq!(ack.content(), DELETE_FAILED_MESSAGE);
        }
    }

    #[tokio::test]
    async fn delete_msg_deletes_existing_message() {
        let state = ModerationState::default();
        let platform = RecordingPlatform::new().with_message(CHANNEL, 900);
        let executor = CommandExecutor::new(&state, &platform);

        let ack = executor
            .execute(ModerationCommand::DeleteMessage {
                channel_id: CHANNEL,
                raw_message_id: "900".to_owned(),
            })
            .await;

        assert_eq!(ack.content(), DELETE_SUCCEEDED_MESSAGE);
        assert_eq!(
            platform.applied(),
            vec![ModerationAction::DeleteMessage {
                channel_id: CHANNEL,
                message_id: 900,
            }]
        );
    }
}
