//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the account, profile and health endpoints together
//! with the payload schemas they exchange. Swagger UI serves it in debug
//! builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::ProfilePage;
use crate::domain::{Document, Error, ErrorCode, FollowResponse, User};
use crate::inbound::http::accounts::{FormContext, LoginForm, RegistrationForm};
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                SESSION_COOKIE_NAME,
                "Session cookie issued by POST /accounts/login or /accounts/register.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "docshare API",
        description = "Account sessions, profile pages and follow toggles.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::accounts::registration_form,
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login_form,
        crate::inbound::http::accounts::login,
        crate::inbound::http::accounts::logout,
        crate::inbound::http::profiles::profile_detail,
        crate::inbound::http::profiles::follow_profile,
        crate::inbound::http::profiles::unfollow_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        User,
        Document,
        ProfilePage,
        FollowResponse,
        FormContext,
        RegistrationForm,
        LoginForm,
    )),
    tags(
        (name = "accounts", description = "Registration, login and logout"),
        (name = "profiles", description = "Profile pages and follow toggles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
