/// Gateway events the moderation pipeline reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InboundEvent {
    MemberJoin { guild_id: u64, user_id: u64 },
    MessageCreate(IncomingMessage),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomingMessage {
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub message_id: u64,
    pub author_id: u64,
    pub content: String,
    /// Creation time in unix milliseconds.
    pub timestamp_millis: u64,
    pub is_bot_author: bool,
}
