use tracing::{debug, error, info, warn};

use crate::action::{Effort, ModerationAction, PlannedAction};
use crate::event::{InboundEvent, IncomingMessage};
use crate::links::contains_link;
use crate::platform::ModerationPlatform;
use crate::state::ModerationState;

pub const SPAM_TIMEOUT_REASON: &str = "Spamming";

/// Result of routing one event through the pipeline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Actions to apply, in order.
    pub actions: Vec<PlannedAction>,
    /// Whether the message should still reach command parsing.
    pub forwarded: bool,
}

/// Routes gateway events to the detectors and plans the resulting actions.
///
/// Planning touches only in-memory state; applying the plan is left to
/// [`apply_planned`].
#[derive(Clone, Debug)]
pub struct Dispatcher {
    state: ModerationState,
}

impl Dispatcher {
    pub fn new(state: ModerationState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &ModerationState {
        &self.state
    }

    pub async fn dispatch(&self, event: &InboundEvent) -> EventOutcome {
        match event {
            InboundEvent::MemberJoin { guild_id, user_id } => {
                self.on_member_join(*guild_id, *user_id).await
            }
            InboundEvent::MessageCreate(message) => self.on_message(message).await,
        }
    }

    async fn on_member_join(&self, guild_id: u64, user_id: u64) -> EventOutcome {
        let Some(role_id) = self.state.autoroles().get(guild_id).await else {
            return EventOutcome::default();
        };

        debug!(guild_id, user_id, role_id, "assigning auto-role");
        EventOutcome {
            actions: vec![PlannedAction::best_effort(ModerationAction::AddRole {
                guild_id,
                user_id,
                role_id,
            })],
            forwarded: false,
        }
    }

    async fn on_message(&self, message: &IncomingMessage) -> EventOutcome {
        if message.is_bot_author {
            return EventOutcome::default();
        }

        let mut actions = Vec::new();
        let delete = ModerationAction::DeleteMessage {
            channel_id: message.channel_id,
            message_id: message.message_id,
        };

        if contains_link(&message.content) {
            debug!(
                author_id = message.author_id,
                message_id = message.message_id,
                "message contains a link"
            );
            actions.push(PlannedAction::reported(delete.clone()));
        }

        let throttled = self
            .state
            .spam()
            .should_throttle(message.author_id, message.timestamp_millis)
            .await;

        if throttled {
            info!(
                author_id = message.author_id,
                channel_id = message.channel_id,
                "spam threshold exceeded"
            );

            if !actions.iter().any(|planned| planned.action == delete) {
                actions.push(PlannedAction::reported(delete));
            }

            if let Some(guild_id) = message.guild_id {
                actions.push(PlannedAction::best_effort(ModerationAction::Timeout {
                    guild_id,
                    user_id: message.author_id,
                    seconds: self.state.settings().spam_timeout.as_secs(),
                    reason: SPAM_TIMEOUT_REASON.to_owned(),
                }));
            }
        }

        EventOutcome {
            actions,
            forwarded: true,
        }
    }
}

/// Apply planned actions in order. A failure never stops the remaining ones.
///
/// Returns how many actions failed.
pub async fn apply_planned<P>(platform: &P, planned: &[PlannedAction]) -> usize
where
    P: ModerationPlatform + ?Sized,
{
    let mut failures = 0;

    for item in planned {
        let kind = item.action.kind();
        let Err(source) = platform.apply(&item.action).await else {
            debug!(action = kind, "moderation action applied");
            continue;
        };

        failures += 1;
        match item.effort {
            Effort::BestEffort => {
                debug!(?source, action = kind, "best-effort moderation action discarded");
            }
            Effort::Reported if source.is_missing_permissions() => {
                warn!(action = kind, "missing permissions for moderation action");
            }
            Effort::Reported => {
                error!(?source, action = kind, "moderation action failed");
            }
        }
    }

    failures
}
