//! Receiver registry delivering profile events in connection order.

use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ProfileEvent;
use crate::domain::ports::{EventPublishError, ProfileEventPublisher};

/// Subscriber notified of every published [`ProfileEvent`].
#[async_trait]
pub trait ProfileEventReceiver: Send + Sync {
    /// Handle `event`. A returned message is reported to the publisher.
    async fn receive(&self, event: &ProfileEvent) -> Result<(), String>;
}

type Receivers = Vec<(String, Arc<dyn ProfileEventReceiver>)>;

/// Named receiver registry.
///
/// Every connected receiver sees every event, even when an earlier receiver
/// fails; the first failure is returned once delivery completes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use docshare::outbound::events::{SignalDispatcher, TracingProfileEventReceiver};
///
/// let dispatcher = SignalDispatcher::default();
/// dispatcher.connect("log", Arc::new(TracingProfileEventReceiver));
/// assert_eq!(dispatcher.receiver_count(), 1);
/// assert!(dispatcher.disconnect("log"));
/// ```
#[derive(Default)]
pub struct SignalDispatcher {
    receivers: RwLock<Receivers>,
}

impl SignalDispatcher {
    /// Connect `receiver` under `id`, replacing any receiver already using it.
    pub fn connect(&self, id: impl Into<String>, receiver: Arc<dyn ProfileEventReceiver>) {
        let id = id.into();
        let mut receivers = self
            .receivers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = receivers.iter_mut().find(|(existing, _)| *existing == id) {
            entry.1 = receiver;
        } else {
            receivers.push((id, receiver));
        }
    }

    /// Disconnect the receiver registered as `id`. Returns `true` if one was
    /// removed.
    pub fn disconnect(&self, id: &str) -> bool {
        let mut receivers = self
            .receivers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = receivers.len();
        receivers.retain(|(existing, _)| existing != id);
        receivers.len() < before
    }

    /// Number of connected receivers.
    pub fn receiver_count(&self) -> usize {
        self.receivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn snapshot(&self) -> Receivers {
        self.receivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProfileEventPublisher for SignalDispatcher {
    async fn publish(&self, event: &ProfileEvent) -> Result<(), EventPublishError> {
        let mut first_failure = None;
        for (id, receiver) in self.snapshot() {
            if let Err(message) = receiver.receive(event).await {
                first_failure.get_or_insert(EventPublishError::receiver(id, message));
            }
        }
        first_failure.map_or(Ok(()), Err)
    }
}
