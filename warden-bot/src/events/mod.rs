use poise::serenity_prelude as serenity;
use tracing::debug;

use warden_core::Data;
use warden_moderation::{InboundEvent, IncomingMessage};
use warden_utils::time::snowflake_unix_millis;

/// Translate a gateway event into a moderation event, if it is one we handle.
pub fn inbound_event(event: &serenity::FullEvent) -> Option<InboundEvent> {
    match event {
        serenity::FullEvent::GuildMemberAddition { new_member } => Some(member_join(new_member)),
        serenity::FullEvent::Message { new_message } => {
            Some(InboundEvent::MessageCreate(incoming_message(new_message)))
        }
        _ => None,
    }
}

fn member_join(member: &serenity::Member) -> InboundEvent {
    InboundEvent::MemberJoin {
        guild_id: member.guild_id.get(),
        user_id: member.user.id.get(),
    }
}

fn incoming_message(message: &serenity::Message) -> IncomingMessage {
    IncomingMessage {
        guild_id: message.guild_id.map(|id| id.get()),
        channel_id: message.channel_id.get(),
        message_id: message.id.get(),
        author_id: message.author.id.get(),
        content: message.content.clone(),
        timestamp_millis: snowflake_unix_millis(message.id.get()),
        is_bot_author: message.author.bot,
    }
}

/// Queue moderation-relevant gateway events for the single consumer.
pub fn forward_event(data: &Data, event: &serenity::FullEvent) {
    let Some(inbound) = inbound_event(event) else {
        return;
    };

    if !data.events.push(inbound) {
        debug!("gateway event dropped; moderation queue closed");
    }
}
