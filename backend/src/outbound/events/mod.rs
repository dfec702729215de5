//! Event dispatch adapters.
//!
//! [`SignalDispatcher`] implements the
//! [`ProfileEventPublisher`](crate::domain::ports::ProfileEventPublisher) port
//! by fanning events out to named receivers, in the spirit of Django signals.

mod dispatcher;
mod tracing_receiver;

pub use dispatcher::{ProfileEventReceiver, SignalDispatcher};
pub use tracing_receiver::TracingProfileEventReceiver;
