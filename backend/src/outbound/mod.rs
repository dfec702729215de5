//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for development and tests
//! - **hashing**: Argon2 password hashing
//! - **events**: receiver registry for profile events
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod events;
pub mod hashing;
pub mod memory;
pub mod persistence;
