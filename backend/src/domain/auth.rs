//! Authentication primitives: login credentials, registration forms, and
//! stored password hashes.
//!
//! Inbound payload parsing stays outside the domain; handlers pass raw strings
//! to the constructors here and receive field-level errors back.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use zeroize::Zeroizing;

use super::{Error, UserValidationError, Username};

/// Message used for any required form field left blank.
pub const FIELD_REQUIRED: &str = "This field is required.";
/// Message reported when the registration passwords differ.
pub const PASSWORD_MISMATCH: &str = "The two password fields didn't match.";
/// Message reported when a registration username is already taken.
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";
/// Non-field message for rejected login attempts.
pub const INVALID_LOGIN: &str =
    "Please enter a correct username and password. Note that both fields may be case-sensitive.";

const INVALID_USERNAME: &str = "Enter a valid username. This value may contain only letters, \
numbers, and @/./+/-/_ characters.";

/// Key under which errors that belong to no single field are collected.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` must be non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use docshare::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" alice ", "s3cret").unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.password(), "s3cret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Field-keyed validation messages, mirroring an HTML form's error list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// True when no field has errors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`.
    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Convert into an `invalid_request` error carrying the messages under
    /// `details.fields`.
    ///
    /// # Examples
    /// ```
    /// use docshare::domain::{ErrorCode, FormErrors};
    ///
    /// let mut errors = FormErrors::default();
    /// errors.add("username", "This field is required.");
    /// let err = errors.into_error("registration form is invalid");
    /// assert_eq!(err.code(), ErrorCode::InvalidRequest);
    /// assert_eq!(
    ///     err.details().unwrap()["fields"]["username"][0],
    ///     "This field is required."
    /// );
    /// ```
    pub fn into_error(self, message: &str) -> Error {
        Error::invalid_request(message).with_details(json!({ "fields": self }))
    }
}

/// Validated registration submission.
///
/// ## Invariants
/// - `username` satisfies [`Username`] rules.
/// - Both password fields were non-empty and identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: Username,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs, collecting every field error.
    ///
    /// # Examples
    /// ```
    /// use docshare::domain::{Registration, PASSWORD_MISMATCH};
    ///
    /// let ok = Registration::try_from_parts("alice", "pw", "pw").unwrap();
    /// assert_eq!(ok.username().as_ref(), "alice");
    ///
    /// let errors = Registration::try_from_parts("alice", "pw", "other").unwrap_err();
    /// assert_eq!(errors.field("password2"), [PASSWORD_MISMATCH.to_owned()]);
    /// ```
    pub fn try_from_parts(
        username: &str,
        password1: &str,
        password2: &str,
    ) -> Result<Self, FormErrors> {
        let mut errors = FormErrors::default();

        let username = match Username::new(username) {
            Ok(name) => Some(name),
            Err(UserValidationError::EmptyUsername) => {
                errors.add("username", FIELD_REQUIRED);
                None
            }
            Err(UserValidationError::UsernameTooLong { max }) => {
                errors.add(
                    "username",
                    format!("Ensure this value has at most {max} characters."),
                );
                None
            }
            Err(_) => {
                errors.add("username", INVALID_USERNAME);
                None
            }
        };

        if password1.is_empty() {
            errors.add("password1", FIELD_REQUIRED);
        }
        if password2.is_empty() {
            errors.add("password2", FIELD_REQUIRED);
        } else if !password1.is_empty() && password1 != password2 {
            errors.add("password2", PASSWORD_MISMATCH);
        }

        match username {
            Some(username) if errors.is_empty() => Ok(Self {
                username,
                password: Zeroizing::new(password1.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Requested username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Chosen password in clear text.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Credentials equivalent to logging in with the submitted values.
    pub fn credentials(&self) -> LoginCredentials {
        LoginCredentials {
            username: self.username.to_string(),
            password: self.password.clone(),
        }
    }
}

/// Encoded password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Revocation counter for a user's sessions.
///
/// A session records the generation current when it was opened and stops
/// authenticating once the stored generation moves past it. Logging out
/// advances the counter, so cookies issued earlier are rejected even if a
/// client replays them.
///
/// # Examples
/// ```
/// use docshare::domain::SessionGeneration;
///
/// let first = SessionGeneration::INITIAL;
/// assert_ne!(first.next(), first);
/// assert_eq!(first.next().value(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionGeneration(i64);

impl SessionGeneration {
    /// Generation assigned to newly registered users.
    pub const INITIAL: Self = Self(0);

    /// Wrap a stored counter value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw counter value.
    pub const fn value(self) -> i64 {
        self.0
    }

    /// The generation that revokes every session opened under `self`.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn registration_reports_every_field() {
        let errors = Registration::try_from_parts("", "", "").expect_err("blank form fails");
        assert_eq!(errors.field("username"), [FIELD_REQUIRED.to_owned()]);
        assert_eq!(errors.field("password1"), [FIELD_REQUIRED.to_owned()]);
        assert_eq!(errors.field("password2"), [FIELD_REQUIRED.to_owned()]);
    }

    #[rstest]
    #[case("bad name")]
    #[case("bad/name")]
    fn registration_rejects_invalid_usernames(#[case] username: &str) {
        let errors =
            Registration::try_from_parts(username, "pw", "pw").expect_err("invalid username");
        assert_eq!(errors.field("username"), [INVALID_USERNAME.to_owned()]);
        assert!(errors.field("password2").is_empty());
    }

    #[rstest]
    fn registration_rejects_mismatched_passwords() {
        let errors =
            Registration::try_from_parts("alice", "one", "two").expect_err("mismatch fails");
        assert_eq!(errors.field("password2"), [PASSWORD_MISMATCH.to_owned()]);
        assert!(errors.field("username").is_empty());
    }

    #[rstest]
    fn registration_credentials_match_submission() {
        let registration =
            Registration::try_from_parts(" alice ", "s3cret", "s3cret").expect("valid form");
        let creds = registration.credentials();
        assert_eq!(creds.username(), "alice");
        assert_eq!(creds.password(), "s3cret");
    }

    #[rstest]
    fn form_errors_serialise_as_field_map() {
        let mut errors = FormErrors::default();
        errors.add("username", USERNAME_TAKEN);
        let value = serde_json::to_value(&errors).expect("serialise errors");
        assert_eq!(value["username"][0], USERNAME_TAKEN);
    }

    #[rstest]
    fn session_generation_serialises_as_a_bare_number() {
        let value = serde_json::to_value(SessionGeneration::new(3)).expect("serialise");
        assert_eq!(value, serde_json::json!(3));
        let parsed: SessionGeneration = serde_json::from_value(value).expect("deserialise");
        assert_eq!(parsed.next(), SessionGeneration::new(4));
    }

    #[rstest]
    fn password_hash_debug_is_redacted() {
        let hash = PasswordHash::new("$argon2id$v=19$secret");
        assert!(!format!("{hash:?}").contains("secret"));
    }
}
