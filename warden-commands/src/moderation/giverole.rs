use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Give a role to a user
#[poise::command(slash_command, rename = "give-role", category = "Moderation")]
pub async fn give_role(
    ctx: Context<'_>,
    #[description = "Member to give the role"] member: serenity::Member,
    #[description = "Role to assign"] role: serenity::Role,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        reply_ephemeral(ctx, guild_only_message()).await?;
        return Ok(());
    };

    if !require_permission(ctx, guild_id, serenity::Permissions::MANAGE_ROLES).await? {
        return Ok(());
    }

    run_and_acknowledge(
        ctx,
        ModerationCommand::GiveRole {
            guild_id: guild_id.get(),
            user_id: member.user.id.get(),
            role_id: role.id.get(),
            role_name: role.name,
        },
    )
    .await
}
