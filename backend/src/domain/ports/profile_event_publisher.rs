//! Port for dispatching profile domain events to subscribers.

use async_trait::async_trait;

use crate::domain::ProfileEvent;

use super::define_port_error;

define_port_error! {
    /// Errors raised while dispatching events.
    pub enum EventPublishError {
        /// A receiver refused or failed to handle the event.
        Receiver { receiver: String, message: String } =>
            "event receiver {receiver} failed: {message}",
    }
}

/// Outbound port delivering [`ProfileEvent`]s to zero or more receivers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileEventPublisher: Send + Sync {
    /// Deliver `event` to every connected receiver.
    async fn publish(&self, event: &ProfileEvent) -> Result<(), EventPublishError>;
}
