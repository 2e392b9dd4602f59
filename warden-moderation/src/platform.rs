use async_trait::async_trait;

use crate::action::ModerationAction;

/// Failure reported by the chat platform for one request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("missing permissions")]
    MissingPermissions,
    #[error("not found")]
    NotFound,
    #[error("rate limited")]
    RateLimited,
    #[error("{0}")]
    Other(String),
}

impl PlatformError {
    pub fn is_missing_permissions(&self) -> bool {
        matches!(self, Self::MissingPermissions)
    }
}

/// Outbound operations against the chat platform.
#[async_trait]
pub trait ModerationPlatform: Send + Sync {
    /// Perform one moderation action.
    async fn apply(&self, action: &ModerationAction) -> Result<(), PlatformError>;

    /// Look up a user account by id, returning its display name.
    async fn resolve_user(&self, user_id: u64) -> Result<String, PlatformError>;

    /// Confirm a message exists and is reachable in the given channel.
    async fn fetch_message(&self, channel_id: u64, message_id: u64) -> Result<(), PlatformError>;
}
