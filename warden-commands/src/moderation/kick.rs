use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Kick a member
#[poise::command(slash_command, category = "Moderation")]
pub async fn kick(
    ctx: Context<'_>,
    #[description = "Member to kick"] member: serenity::Member,
    #[description = "Reason for kick"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        reply_ephemeral(ctx, guild_only_message()).await?;
        return Ok(());
    };

    if !require_permission(ctx, guild_id, serenity::Permissions::KICK_MEMBERS).await? {
        return Ok(());
    }

    if member.user.id == ctx.author().id {
        reply_ephemeral(ctx, "You can't kick yourself.").await?;
        return Ok(());
    }

    run_and_acknowledge(
        ctx,
        ModerationCommand::Kick {
            guild_id: guild_id.get(),
            user_id: member.user.id.get(),
            reason,
        },
    )
    .await
}
