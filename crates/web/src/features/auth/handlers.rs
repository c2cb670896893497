use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use axum_extra::extract::cookie::PrivateCookieJar;
use chrono::Utc;
use storage::{
    dto::account::{LoginRequest, SessionResponse},
    services::permissions::Actor,
};
use validator::Validate;

use crate::error::WebError;
use crate::middleware::auth::AuthState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; the session cookie is set", body = SessionResponse),
        (status = 400, description = "Malformed credentials"),
        (status = 401, description = "Unknown email or wrong password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(auth): State<AuthState>,
    jar: PrivateCookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(PrivateCookieJar, Json<SessionResponse>), WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let actor = services::authenticate(auth.db.pool(), req.email.trim(), &req.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Failed login attempt");
            WebError::Unauthorized
        })?;

    let jar = auth.sessions.open(jar, actor.principal(), Utc::now())?;
    tracing::info!(principal = ?actor.principal(), "Session opened");

    Ok((jar, Json(SessionResponse { actor })))
}

#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cookie cleared")
    ),
    tag = "auth"
)]
pub async fn logout(
    State(auth): State<AuthState>,
    jar: PrivateCookieJar,
) -> (StatusCode, PrivateCookieJar) {
    (StatusCode::NO_CONTENT, auth.sessions.close(jar))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "The account behind the session", body = SessionResponse),
        (status = 401, description = "No valid session")
    ),
    tag = "auth"
)]
pub async fn me(Extension(actor): Extension<Actor>) -> Json<SessionResponse> {
    Json(SessionResponse { actor })
}
