use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Unban a user by ID
#[poise::command(slash_command, category = "Moderation")]
pub async fn unban(
    ctx: Context<'_>,
    #[description = "ID of the user to unban"] user_id: String,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        reply_ephemeral(ctx, guild_only_message()).await?;
        return Ok(());
    };

    if !require_permission(ctx, guild_id, serenity::Permissions::BAN_MEMBERS).await? {
        return Ok(());
    }

    run_and_acknowledge(
        ctx,
        ModerationCommand::Unban {
            guild_id: guild_id.get(),
            raw_user_id: user_id,
        },
    )
    .await
}
