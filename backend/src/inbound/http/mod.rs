//! HTTP inbound adapter exposing the account and profile endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod profiles;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
