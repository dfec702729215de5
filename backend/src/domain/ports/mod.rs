//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod document_repository;
mod follow_command;
mod follow_repository;
mod login_service;
mod password_hasher;
mod profile_event_publisher;
mod profile_query;
mod registration_service;
mod user_repository;

#[cfg(test)]
pub use document_repository::MockDocumentRepository;
pub use document_repository::{DocumentRepository, DocumentRepositoryError};
#[cfg(test)]
pub use follow_command::MockFollowCommand;
pub use follow_command::{FollowCommand, FollowRequest};
#[cfg(test)]
pub use follow_repository::MockFollowRepository;
pub use follow_repository::{FollowRepository, FollowRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use profile_event_publisher::MockProfileEventPublisher;
pub use profile_event_publisher::{EventPublishError, ProfileEventPublisher};
#[cfg(test)]
pub use profile_query::MockProfileQuery;
pub use profile_query::{ProfilePage, ProfilePageRequest, ProfileQuery};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
