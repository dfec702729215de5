//! Receiver that records profile events in the structured log.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ProfileEvent;

use super::ProfileEventReceiver;

/// Logs each event with its participants and trace identifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProfileEventReceiver;

#[async_trait]
impl ProfileEventReceiver for TracingProfileEventReceiver {
    async fn receive(&self, event: &ProfileEvent) -> Result<(), String> {
        let payload = event.payload();
        info!(
            event = event.name(),
            sender = payload.sender,
            trace_id = ?payload.trace_id,
            follower = %payload.follower.username(),
            following = %payload.following.username(),
            "profile event"
        );
        Ok(())
    }
}
