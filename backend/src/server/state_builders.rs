//! Wiring of domain services onto repository adapters.

use std::sync::Arc;

use crate::domain::ports::{DocumentRepository, FollowRepository, UserRepository};
use crate::domain::{AccountService, ProfileService};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::events::{SignalDispatcher, TracingProfileEventReceiver};
use crate::outbound::hashing::Argon2PasswordHasher;
use crate::outbound::memory::{
    InMemoryDocumentRepository, InMemoryFollowRepository, InMemoryUserRepository,
};
use crate::outbound::persistence::{
    DbPool, DieselDocumentRepository, DieselFollowRepository, DieselUserRepository,
};

/// Receiver id of the logging subscriber connected by [`default_dispatcher`].
pub const TRACING_RECEIVER_ID: &str = "tracing";

/// Dispatcher with the logging receiver connected.
pub fn default_dispatcher() -> Arc<SignalDispatcher> {
    let dispatcher = SignalDispatcher::default();
    dispatcher.connect(TRACING_RECEIVER_ID, Arc::new(TracingProfileEventReceiver));
    Arc::new(dispatcher)
}

/// Build HTTP state over the given repositories and event dispatcher.
pub fn http_state_from_repositories<U, F, D>(
    users: Arc<U>,
    follows: Arc<F>,
    documents: Arc<D>,
    events: Arc<SignalDispatcher>,
) -> HttpState
where
    U: UserRepository + 'static,
    F: FollowRepository + 'static,
    D: DocumentRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        users.clone(),
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let profiles = Arc::new(ProfileService::new(users, follows, documents, events));

    HttpState::new(HttpStatePorts {
        login: accounts.clone(),
        registration: accounts,
        profiles: profiles.clone(),
        follows: profiles,
    })
}

/// Build HTTP state backed by PostgreSQL when a pool is configured, otherwise
/// by in-memory repositories.
pub fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    let events = default_dispatcher();
    match db_pool {
        Some(pool) => http_state_from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselFollowRepository::new(pool.clone())),
            Arc::new(DieselDocumentRepository::new(pool.clone())),
            events,
        ),
        None => http_state_from_repositories(
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(InMemoryFollowRepository::default()),
            Arc::new(InMemoryDocumentRepository::default()),
            events,
        ),
    }
}
