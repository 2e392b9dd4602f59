pub mod moderation;
pub mod platform;

use warden_core::{Data, Error};

pub use platform::SerenityPlatform;

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![
        moderation::setautorole::set_autorole(),
        moderation::giverole::give_role(),
        moderation::kick::kick(),
        moderation::ban::ban(),
        moderation::unban::unban(),
        moderation::timeout::timeout(),
        moderation::clear::clear(),
        moderation::movemember::move_member(),
        moderation::deletemsg::delete_msg(),
    ]
}

#[cfg(test)]
mod tests {
    use super::commands;

    #[test]
    fn commands_are_slash_only() {
        let commands = commands();
        assert_eq!(commands.len(), 9);

        for command in &commands {
            assert!(
                command.slash_action.is_some(),
                "{} is not a slash command",
                command.name
            );
            assert!(
                command.prefix_action.is_none(),
                "{} would reply publicly as a prefix command",
                command.name
            );
        }
    }

    #[test]
    fn registers_the_expected_names() {
        let names: Vec<String> = commands().into_iter().map(|command| command.name).collect();
        assert_eq!(
            names,
            [
                "set-autorole",
                "give-role",
                "kick",
                "ban",
                "unban",
                "timeout",
                "clear",
                "move",
                "delete-msg",
            ]
        );
    }
}
