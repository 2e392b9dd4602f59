use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Clear a number of messages
#[poise::command(slash_command, category = "Moderation")]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Number of messages to delete"] amount: u32,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        reply_ephemeral(ctx, guild_only_message()).await?;
        return Ok(());
    };

    if !require_permission(ctx, guild_id, serenity::Permissions::MANAGE_MESSAGES).await? {
        return Ok(());
    }

    run_and_acknowledge(
        ctx,
        ModerationCommand::Clear {
            channel_id: ctx.channel_id().get(),
            amount: u64::from(amount),
        },
    )
    .await
}
