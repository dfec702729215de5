//! Profile HTTP handlers.
//!
//! ```text
//! GET    /profiles/{username}
//! POST   /profiles/{username}   follow
//! DELETE /profiles/{username}   unfollow
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use tracing::info;

use crate::domain::ports::{FollowRequest, ProfilePage, ProfilePageRequest};
use crate::domain::{Error, FollowResponse, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Resolve the path segment to a username, matching it exactly.
///
/// A segment that fails username rules, or only matches once surrounding
/// whitespace is trimmed, cannot name an existing user.
fn parse_username(raw: &str) -> Result<Username, Error> {
    Username::new(raw)
        .ok()
        .filter(|username| username.as_ref() == raw)
        .ok_or_else(|| Error::not_found(format!("no user named {raw}")))
}

async fn follow_request(
    state: &HttpState,
    session: &SessionContext,
    username: &str,
) -> Result<FollowRequest, Error> {
    let follower = session.require_user_id(state.login.as_ref()).await?;
    Ok(FollowRequest {
        follower,
        following: parse_username(username)?,
    })
}

/// Profile page context with visible documents and follow flags.
#[utoipa::path(
    get,
    path = "/profiles/{username}",
    params(("username" = String, Path, description = "Profile username")),
    responses(
        (status = 200, description = "Profile context", body = ProfilePage),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profiles/{username}")]
pub async fn profile_detail(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfilePage>> {
    let request = ProfilePageRequest {
        username: parse_username(&path)?,
        viewer: session.user_id(state.login.as_ref()).await?,
    };
    let page = state.profiles.profile_page(&request).await?;
    Ok(web::Json(page))
}

/// Follow the profile user.
///
/// Answers `200` with `{"success": true}`, or with
/// `{"error": "You already following this people."}` when the edge exists.
#[utoipa::path(
    post,
    path = "/profiles/{username}",
    params(("username" = String, Path, description = "Profile username")),
    responses(
        (status = 200, description = "Follow outcome", body = FollowResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "followProfile"
)]
#[post("/profiles/{username}")]
pub async fn follow_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let request = follow_request(&state, &session, &path).await?;
    let outcome = state.follows.follow(&request).await?;
    info!(follower = %request.follower, following = %request.following, ?outcome, "follow handled");
    Ok(HttpResponse::Ok().json(FollowResponse::from(outcome)))
}

/// Unfollow the profile user; succeeds even when no edge existed.
#[utoipa::path(
    delete,
    path = "/profiles/{username}",
    params(("username" = String, Path, description = "Profile username")),
    responses(
        (status = 200, description = "Unfollowed", body = FollowResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown user", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["profiles"],
    operation_id = "unfollowProfile"
)]
#[delete("/profiles/{username}")]
pub async fn unfollow_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let request = follow_request(&state, &session, &path).await?;
    state.follows.unfollow(&request).await?;
    info!(follower = %request.follower, following = %request.following, "unfollow handled");
    Ok(HttpResponse::Ok().json(FollowResponse::success()))
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
