use poise::serenity_prelude as serenity;

/// Resolve a member's effective guild-level permissions.
///
/// The guild owner implicitly holds every permission. Channel overwrites are
/// not considered.
pub async fn resolve_user_permissions(
    http: &serenity::Http,
    guild_id: serenity::GuildId,
    user_id: serenity::UserId,
) -> anyhow::Result<serenity::Permissions> {
    let guild = guild_id.to_partial_guild(http).await?;
    if guild.owner_id == user_id {
        return Ok(serenity::Permissions::all());
    }

    let member = guild_id.member(http, user_id).await?;
    let everyone_role_id = serenity::RoleId::new(guild_id.get());

    let resolved = guild
        .roles
        .values()
        .filter(|role| role.id == everyone_role_id || member.roles.contains(&role.id))
        .fold(serenity::Permissions::empty(), |acc, role| acc | role.permissions);

    Ok(resolved)
}

/// Whether `granted` satisfies `required`. `ADMINISTRATOR` satisfies anything.
pub fn permits(granted: serenity::Permissions, required: serenity::Permissions) -> bool {
    granted.contains(serenity::Permissions::ADMINISTRATOR) || granted.contains(required)
}

/// Names of the permissions in `required` that `granted` lacks, sorted.
pub fn missing_permission_names(
    granted: serenity::Permissions,
    required: serenity::Permissions,
) -> Vec<String> {
    if permits(granted, required) {
        return Vec::new();
    }

    let mut names: Vec<String> = required
        .difference(granted)
        .iter_names()
        .map(|(name, _flag)| name.to_owned())
        .collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use poise::serenity_prelude::Permissions;

    use super::{missing_permission_names, permits};

    #[test]
    fn administrator_satisfies_everything() {
        assert!(permits(Permissions::ADMINISTRATOR, Permissions::BAN_MEMBERS));
        assert!(missing_permission_names(Permissions::ADMINISTRATOR, Permissions::KICK_MEMBERS).is_empty());
    }

    #[test]
    fn reports_missing_permissions() {
        let granted = Permissions::KICK_MEMBERS;
        assert!(permits(granted, Permissions::KICK_MEMBERS));
        assert!(!permits(granted, Permissions::BAN_MEMBERS));
        assert_eq!(
            missing_permission_names(granted, Permissions::BAN_MEMBERS | Permissions::KICK_MEMBERS),
            vec!["BAN_MEMBERS".to_owned()]
        );
    }
}
