//! Application settings and the server configuration built from them.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::session_config::SessionSettings;
use crate::outbound::persistence::DbPool;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Process settings loaded from `DOCSHARE_*` variables, config files and
/// command-line flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DOCSHARE")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    #[ortho_config(default = DEFAULT_BIND_ADDR.to_owned())]
    pub bind_addr: String,
    /// PostgreSQL connection string. Without it the server runs on in-memory
    /// repositories.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = DEFAULT_DB_MAX_CONNECTIONS)]
    pub db_max_connections: u32,
}

impl AppSettings {
    /// Parsed bind address.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr.parse()
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a server configuration from session settings and a bind
    /// address.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
        }
    }

    /// Attach a database connection pool; repositories switch from memory to
    /// PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    use super::*;

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("docshare")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("DOCSHARE_BIND_ADDR", None::<String>),
            ("DOCSHARE_DATABASE_URL", None::<String>),
            ("DOCSHARE_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_max_connections, DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DOCSHARE_BIND_ADDR", Some("127.0.0.1:9000".to_owned())),
            (
                "DOCSHARE_DATABASE_URL",
                Some("postgres://localhost/docshare".to_owned()),
            ),
            ("DOCSHARE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
        ]);

        let settings = load_from_empty_args();

        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9000
        );
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/docshare")
        );
        assert_eq!(settings.db_max_connections, 4);
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = AppSettings {
            bind_addr: "not-an-address".to_owned(),
            database_url: None,
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        };

        assert!(settings.bind_addr().is_err());
    }
}
