//! Account HTTP handlers: registration, login and logout.
//!
//! ```text
//! GET  /accounts/register
//! POST /accounts/register  username=alice&password1=...&password2=...
//! GET  /accounts/login?next=/profiles/alice
//! POST /accounts/login?next=/profiles/alice  username=alice&password=...
//! GET  /accounts/logout
//! ```
//!
//! Successful submissions answer `302 Found`; invalid forms answer
//! `400 invalid_request` with field messages under `details.fields`.

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, FIELD_REQUIRED, FormErrors, INVALID_LOGIN, LoginCredentials, Registration, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Path every successful account action redirects to by default.
pub const HOME_PATH: &str = "/";

const REGISTRATION_FIELDS: [&str; 3] = ["username", "password1", "password2"];
const LOGIN_FIELDS: [&str; 2] = ["username", "password"];

/// Registration form body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub password1: String,
    pub password2: String,
}

/// Login form body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Optional post-login destination.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NextQuery {
    /// Where to redirect after login.
    pub next: Option<String>,
}

impl NextQuery {
    fn raw(&self) -> &str {
        self.next.as_deref().unwrap_or_default()
    }
}

/// Context returned by the form pages in place of a rendered template.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormContext {
    /// Field names the form expects.
    pub fields: Vec<String>,
    /// Post-login destination, echoed back to the login page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.to_owned()))
        .finish()
}

/// Resolve the post-login redirect target: `next` when non-empty, else
/// [`HOME_PATH`].
///
/// The target is used verbatim, so it may point at another origin.
///
/// # Examples
/// ```
/// use docshare::inbound::http::accounts::next_or_home;
///
/// assert_eq!(next_or_home("/profiles/alice"), "/profiles/alice");
/// assert_eq!(next_or_home("https://docs.example.org/"), "https://docs.example.org/");
/// assert_eq!(next_or_home(""), "/");
/// ```
pub fn next_or_home(next: &str) -> &str {
    if next.is_empty() { HOME_PATH } else { next }
}

/// Open a session for `user_id` bound to its current session generation.
async fn start_session(
    state: &HttpState,
    session: &SessionContext,
    user_id: &UserId,
) -> ApiResult<()> {
    let generation = state
        .login
        .session_generation(user_id)
        .await?
        .ok_or_else(|| Error::unauthorized(INVALID_LOGIN))?;
    session.log_in(user_id, generation)
}

fn login_form_errors(form: &LoginForm) -> FormErrors {
    let mut errors = FormErrors::default();
    if form.username.trim().is_empty() {
        errors.add("username", FIELD_REQUIRED);
    }
    if form.password.is_empty() {
        errors.add("password", FIELD_REQUIRED);
    }
    errors
}

/// Empty registration form.
#[utoipa::path(
    get,
    path = "/accounts/register",
    responses((status = 200, description = "Registration form", body = FormContext)),
    tags = ["accounts"],
    operation_id = "registrationForm",
    security([])
)]
#[get("/register")]
pub async fn registration_form() -> web::Json<FormContext> {
    web::Json(FormContext {
        fields: REGISTRATION_FIELDS.map(str::to_owned).to_vec(),
        next: None,
    })
}

/// Create an account, log it in, and redirect home.
#[utoipa::path(
    post,
    path = "/accounts/register",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Registered and logged in", headers(
            ("Location" = String, description = "Redirect target"),
            ("Set-Cookie" = String, description = "Session cookie")
        )),
        (status = 400, description = "Invalid form", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<RegistrationForm>,
) -> ApiResult<HttpResponse> {
    let form = form.into_inner();
    let registration =
        Registration::try_from_parts(&form.username, &form.password1, &form.password2)
            .map_err(|errors| errors.into_error("registration form is invalid"))?;

    let user = state.registration.register(&registration).await?;
    let user_id = state.login.authenticate(&registration.credentials()).await?;
    start_session(&state, &session, &user_id).await?;

    info!(user_id = %user.id(), username = %user.username(), "registration completed");
    Ok(redirect(HOME_PATH))
}

/// Login form, echoing the `next` parameter.
#[utoipa::path(
    get,
    path = "/accounts/login",
    params(NextQuery),
    responses((status = 200, description = "Login form", body = FormContext)),
    tags = ["accounts"],
    operation_id = "loginForm",
    security([])
)]
#[get("/login")]
pub async fn login_form(query: web::Query<NextQuery>) -> web::Json<FormContext> {
    web::Json(FormContext {
        fields: LOGIN_FIELDS.map(str::to_owned).to_vec(),
        next: Some(query.raw().to_owned()),
    })
}

/// Authenticate and redirect to `next` or home.
#[utoipa::path(
    post,
    path = "/accounts/login",
    params(NextQuery),
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 302, description = "Logged in", headers(
            ("Location" = String, description = "Redirect target"),
            ("Set-Cookie" = String, description = "Session cookie")
        )),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<NextQuery>,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let errors = login_form_errors(&form);
    if !errors.is_empty() {
        return Err(errors.into_error("login form is invalid"));
    }
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let user_id = state.login.authenticate(&credentials).await?;
    start_session(&state, &session, &user_id).await?;

    info!(%user_id, "login succeeded");
    Ok(redirect(next_or_home(query.raw())))
}

/// Revoke the user's sessions and redirect home.
///
/// Every session cookie issued to the user before this call stops
/// authenticating, not only the one presented.
#[utoipa::path(
    get,
    path = "/accounts/logout",
    responses(
        (status = 302, description = "Logged out", headers(("Location" = String, description = "Home path"))),
        (status = 503, description = "Session store unavailable", body = Error)
    ),
    tags = ["accounts"],
    operation_id = "logout",
    security([])
)]
#[get("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    session.log_out(state.login.as_ref()).await?;
    Ok(redirect(HOME_PATH))
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
