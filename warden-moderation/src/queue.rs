use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use crate::dispatch::{Dispatcher, apply_planned};
use crate::event::InboundEvent;
use crate::platform::ModerationPlatform;

/// Ordered, single-consumer event queue.
///
/// Events are handled one at a time in arrival order: each one is planned by
/// the [`Dispatcher`] and its actions applied before the next is taken.
#[derive(Clone, Debug)]
pub struct EventQueue {
    sender: mpsc::UnboundedSender<InboundEvent>,
}

impl EventQueue {
    /// Start the consumer task. It stops once every queue handle is dropped
    /// and the backlog is drained.
    pub fn spawn(
        dispatcher: Dispatcher,
        platform: Arc<dyn ModerationPlatform>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let handle = tokio::spawn(consume(receiver, dispatcher, platform));
        (Self { sender }, handle)
    }

    /// Enqueue an event. Returns false if the consumer is gone.
    pub fn push(&self, event: InboundEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                warn!("moderation event queue is closed; dropping event");
                false
            }
        }
    }
}

async fn consume(
    mut receiver: mpsc::UnboundedReceiver<InboundEvent>,
    dispatcher: Dispatcher,
    platform: Arc<dyn ModerationPlatform>,
) {
    info!("moderation event queue started");

    while let Some(event) = receiver.recv().await {
        let outcome = dispatcher.dispatch(&event).await;
        let failures = if outcome.actions.is_empty() {
            0
        } else {
            apply_planned(platform.as_ref(), &outcome.actions).await
        };

        let tracked_users = dispatcher.state().spam().tracked_users().await;
        debug!(
            planned = outcome.actions.len(),
            failures,
            tracked_users,
            "moderation event handled"
        );

        if outcome.forwarded {
            trace!("message left for command parsing");
        }
    }

    info!("moderation event queue stopped");
}
