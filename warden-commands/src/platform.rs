use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use tracing::debug;

use warden_moderation::{ModerationAction, ModerationPlatform, PlatformError};
use warden_utils::cleanup::purge_recent_messages;
use warden_utils::time::unix_secs_after;

const MISSING_PERMISSIONS_CODE: isize = 50013;

/// [`ModerationPlatform`] backed by Discord's HTTP API.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<serenity::Http>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ModerationPlatform for SerenityPlatform {
    async fn apply(&self, action: &ModerationAction) -> Result<(), PlatformError> {
        let http = self.http.as_ref();

        match action {
            ModerationAction::DeleteMessage {
                channel_id,
                message_id,
            } => serenity::ChannelId::new(*channel_id)
                .delete_message(http, serenity::MessageId::new(*message_id))
                .await
                .map_err(classify),
            ModerationAction::Timeout {
                guild_id,
                user_id,
                seconds,
                reason,
            } => {
                let until_unix = unix_secs_after(Duration::from_secs(*seconds));
                let until = serenity::Timestamp::from_unix_timestamp(
                    i64::try_from(until_unix).unwrap_or(i64::MAX),
                )
                .map_err(|source| PlatformError::Other(source.to_string()))?;

                let edit = serenity::EditMember::new()
                    .disable_communication_until_datetime(until)
                    .audit_log_reason(reason);
                serenity::GuildId::new(*guild_id)
                    .edit_member(http, serenity::UserId::new(*user_id), edit)
                    .await
                    .map(|_| ())
                    .map_err(classify)
            }
            ModerationAction::Kick {
                guild_id,
                user_id,
                reason,
            } => serenity::GuildId::new(*guild_id)
                .kick_with_reason(http, serenity::UserId::new(*user_id), reason)
                .await
                .map_err(classify),
            ModerationAction::Ban {
                guild_id,
                user_id,
                reason,
            } => serenity::GuildId::new(*guild_id)
                .ban_with_reason(http, serenity::UserId::new(*user_id), 0, reason)
                .await
                .map_err(classify),
            ModerationAction::Unban { guild_id, user_id } => serenity::GuildId::new(*guild_id)
                .unban(http, serenity::UserId::new(*user_id))
                .await
                .map_err(classify),
            ModerationAction::MoveMember {
                guild_id,
                user_id,
                channel_id,
            } => serenity::GuildId::new(*guild_id)
                .move_member(
                    http,
                    serenity::UserId::new(*user_id),
                    serenity::ChannelId::new(*channel_id),
                )
                .await
                .map(|_| ())
                .map_err(classify),
            ModerationAction::AddRole {
                guild_id,
                user_id,
                role_id,
            } => http
                .add_member_role(
                    serenity::GuildId::new(*guild_id),
                    serenity::UserId::new(*user_id),
                    serenity::RoleId::new(*role_id),
                    None,
                )
                .await
                .map_err(classify),
            ModerationAction::PurgeChannel { channel_id, limit } => {
                let deleted =
                    purge_recent_messages(http, serenity::ChannelId::new(*channel_id), *limit)
                        .await
                        .map_err(classify_anyhow)?;
                debug!(channel_id, requested = limit, deleted, "channel purged");
                Ok(())
            }
        }
    }

    async fn resolve_user(&self, user_id: u64) -> Result<String, PlatformError> {
        let user = self
            .http
            .get_user(serenity::UserId::new(user_id))
            .await
            .map_err(classify)?;

        Ok(user.global_name.clone().unwrap_or_else(|| user.name.clone()))
    }

    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError> {
        serenity::ChannelId::new(channel_id)
            .message(self.http.as_ref(), serenity::MessageId::new(message_id))
            .await
            .map(|_| ())
            .map_err(classify)
    }
}

fn classify(source: serenity::Error) -> PlatformError {
    let serenity::Error::Http(serenity::HttpError::UnsuccessfulRequest(response)) = &source else {
        return PlatformError::Other(source.to_string());
    };

    classify_status(
        response.status_code.as_u16(),
        response.error.code,
        &response.error.message,
    )
}

/// Map an HTTP status and Discord JSON error code onto [`PlatformError`].
fn classify_status(status: u16, code: isize, message: &str) -> PlatformError {
    match status {
        _ if code == MISSING_PERMISSIONS_CODE => PlatformError::MissingPermissions,
        403 => PlatformError::MissingPermissions,
        404 => PlatformError::NotFound,
        429 => PlatformError::RateLimited,
        _ => PlatformError::Other(message.to_owned()),
    }
}

fn classify_anyhow(source: anyhow::Error) -> PlatformError {
    match source.downcast::<serenity::Error>() {
        Ok(source) => classify(source),
        Err(other) => PlatformError::Other(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{MISSING_PERMISSIONS_CODE, classify_anyhow, classify_status};
    use warden_moderation::PlatformError;

    #[test]
    fn missing_permissions_code_wins_over_status() {
        assert_eq!(
            classify_status(400, MISSING_PERMISSIONS_CODE, "Missing Permissions"),
            PlatformError::MissingPermissions
        );
        assert_eq!(
            classify_status(403, 0, "Forbidden"),
            PlatformError::MissingPermissions
        );
    }

    #[test]
    fn maps_not_found_and_rate_limits() {
        assert_eq!(
            classify_status(404, 10008, "Unknown Message"),
            PlatformError::NotFound
        );
        assert_eq!(
            classify_status(429, 0, "You are being rate limited."),
            PlatformError::RateLimited
        );
    }

    #[test]
    fn other_statuses_keep_the_discord_message() {
        assert_eq!(
            classify_status(400, 50035, "Invalid Form Body"),
            PlatformError::Other("Invalid Form Body".to_owned())
        );
    }

    #[test]
    fn non_serenity_errors_become_other() {
        assert_eq!(
            classify_anyhow(anyhow::anyhow!("history exhausted")),
            PlatformError::Other("history exhausted".to_owned())
        );
    }
}
