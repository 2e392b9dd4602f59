use poise::serenity_prelude as serenity;

use crate::moderation::support::{
    guild_only_message, reply_ephemeral, require_permission, run_and_acknowledge,
};
use warden_core::{Context, Error};
use warden_moderation::ModerationCommand;

/// Timeout a user
///
/// Durations add up unit tokens: `d`/`day`, `h`, `min`/`minute`, `s`,
/// `m`/`month` and `y`/`year`. Note that `m` is a month.
#[poise::command(slash_command, category = "Moderation")]
pub async fn timeout(
    ctx: Context<'_>,
    #[description = "User to timeout"] member: serenity::Member,
    #[description = "e.g. 1d, 10min, 2m, 1y"] duration: String,
    #[description = "Reason"]
    #[rest]
    reason: Option<String>,
) -> Result<(), Error> {
    let Some(guild_id) = ctx.guild_id() else {
        reply_ephemeral(ctx, guild_only_message()).await?;
        return Ok(());
    };

    if !require_permission(ctx, guild_id, serenity::Permissions::MODERATE_MEMBERS).await? {
        return Ok(());
    }

    if member.user.id == ctx.author().id {
        reply_ephemeral(ctx, "You can't timeout yourself.").await?;
        return Ok(());
    }

    run_and_acknowledge(
        ctx,
        ModerationCommand::Timeout {
            guild_id: guild_id.get(),
            user_id: member.user.id.get(),
            duration,
            reason,
        },
    )
    .await
}
