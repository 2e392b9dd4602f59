pub mod action;
pub mod autorole;
pub mod dispatch;
pub mod event;
pub mod executor;
pub mod links;
pub mod platform;
pub mod queue;
pub mod settings;
pub mod spam;
pub mod state;

#[cfg(test)]
mod testing;

pub use action::{Effort, ModerationAction, PlannedAction};
pub use dispatch::{Dispatcher, EventOutcome, apply_planned};
pub use event::{InboundEvent, IncomingMessage};
pub use executor::{Acknowledgment, CommandExecutor, ModerationCommand};
pub use platform::{ModerationPlatform, PlatformError};
pub use queue::EventQueue;
pub use settings::ModerationSettings;
pub use state::ModerationState;
