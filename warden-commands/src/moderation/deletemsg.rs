use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Delete a message by ID
#[poise::command(slash_command, rename = "delete-msg", category = "Moderation")]
pub async fn delete_msg(
    ctx: Context<'_>,
    #[description = "ID of the message to delete"] message_id: String,
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
        ModerationCommand::DeleteMessage {
            channel_id: ctx.channel_id().get(),
            raw_message_id: message_id,
        },
    )
    .await
}
