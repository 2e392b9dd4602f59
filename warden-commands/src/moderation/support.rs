use poise::serenity_prelude as serenity;

use crate::platform::SerenityPlatform;
use warden_core::{Context, Error};
use warden_moderation::{CommandExecutor, ModerationCommand};
use warden_utils::permissions::{missing_permission_names, permits, resolve_user_permissions};

pub fn guild_only_message() -> &'static str {
    "This command only works in servers."
}

pub async fn reply_ephemeral(ctx: Context<'_>, content: impl Into<String>) -> Result<(), Error> {
    ctx.send(
        poise::CreateReply::default()
            .content(content)
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

/// Defer the response and check the invoker's guild permissions.
///
/// Replies with the missing permission names and returns `false` when the
/// invoker may not run the command.
pub async fn require_permission(
    ctx: Context<'_>,
    guild_id: serenity::GuildId,
    required: serenity::Permissions,
) -> Result<bool, Error> {
    ctx.defer_ephemeral().await?;

    let granted = resolve_user_permissions(ctx.http(), guild_id, ctx.author().id).await?;
    if permits(granted, required) {
        return Ok(true);
    }

    let missing = missing_permission_names(granted, required).join(", ");
    reply_ephemeral(
        ctx,
        format!("You need the {} permission to use this command.", missing),
    )
    .await?;
    Ok(false)
}

/// Execute a command against Discord and send its acknowledgment to the invoker.
pub async fn run_and_acknowledge(ctx: Context<'_>, command: ModerationCommand) -> Result<(), Error> {
    let platform = SerenityPlatform::new(ctx.serenity_context().http.clone());
    let ack = CommandExecutor::new(&ctx.data().moderation, &platform)
        .execute(command)
        .await;

    reply_ephemeral(ctx, ack.into_content()).await
}
