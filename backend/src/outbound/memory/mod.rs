//! In-memory adapters for the repository ports.
//!
//! Used when no database URL is configured and by integration tests. State
//! lives behind a [`Mutex`] and mirrors the uniqueness rules the PostgreSQL
//! schema enforces.

mod documents;
mod follows;
mod users;

use std::sync::{Mutex, MutexGuard};

pub use documents::InMemoryDocumentRepository;
pub use follows::InMemoryFollowRepository;
pub use users::InMemoryUserRepository;

/// Lock `mutex`, mapping poisoning onto the caller's query error.
fn lock<'a, T, E>(
    mutex: &'a Mutex<T>,
    query: impl FnOnce(String) -> E,
) -> Result<MutexGuard<'a, T>, E> {
    mutex
        .lock()
        .map_err(|err| query(format!("in-memory store poisoned: {err}")))
}
