use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Move a member to a voice channel
#[poise::command(slash_command, rename = "move", category = "Moderation")]
pub async fn move_member(
    ctx: Context<'_>,
    #[description = "Member to move"] member: serenity::Member,
    #[description = "Voice channel to move them to"]
    #[channel_types("Voice", "Stage")]
    vc: serenity::GuildChannel,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        reply_ephemeral(ctx, guild_only_message()).await?;
        return Ok(());
    };

    if !require_permission(ctx, guild_id, serenity::Permissions::MOVE_MEMBERS).await? {
        return Ok(());
    }

    if !matches!(
        vc.kind,
        serenity::ChannelType::Voice | serenity::ChannelType::Stage
    ) {
        reply_ephemeral(ctx, "That is not a voice channel.").await?;
        return Ok(());
    }

    run_and_acknowledge(
        ctx,
        ModerationCommand::Move {
            guild_id: guild_id.get(),
            user_id: member.user.id.get(),
            channel_id: vc.id.get(),
            channel_name: vc.name,
        },
    )
    .await
}
