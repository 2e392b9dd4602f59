use warden_moderation::{EventQueue, ModerationState};

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub moderation: ModerationState,
    pub events: EventQueue,
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
