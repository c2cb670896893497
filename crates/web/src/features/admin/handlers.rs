use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::account::{CreateAdminRequest, CreateCaptainRequest, ResetPointsResponse},
    models::{Admin, Captain},
    services::permissions::Actor,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/admin/reset-points",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "All points zeroed and results deleted", body = ResetPointsResponse),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required")
    ),
    tag = "admin"
)]
pub async fn reset_points(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<ResetPointsResponse>, WebError> {
    let summary = services::reset_points(db.pool(), &actor).await?;

    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/admin/admins",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "All admin accounts", body = Vec<Admin>),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required")
    ),
    tag = "admin"
)]
pub async fn list_admins(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Admin>>, WebError> {
    let admins = services::list_admins(db.pool(), &actor).await?;

    Ok(Json(admins))
}

#[utoipa::path(
    post,
    path = "/api/admin/admins",
    request_body = CreateAdminRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Admin created", body = Admin),
        (status = 400, description = "Validation error"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required"),
        (status = 409, description = "Email already exists")
    ),
    tag = "admin"
)]
pub async fn create_admin(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<CreateAdminRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let admin = services::create_admin(db.pool(), &actor, &req).await?;

    Ok((StatusCode::CREATED, Json(admin)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/admins/{id}",
    params(
        ("id" = Uuid, Path, description = "Admin ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 204, description = "Admin deleted"),
        (status = 400, description = "Cannot delete your own account"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required"),
        (status = 404, description = "Admin not found")
    ),
    tag = "admin"
)]
pub async fn delete_admin(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(admin_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_admin(db.pool(), &actor, admin_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    get,
    path = "/api/admin/captains",
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "All captain and coordinator accounts", body = Vec<Captain>),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required")
    ),
    tag = "admin"
)]
pub async fn list_captains(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Vec<Captain>>, WebError> {
    let captains = services::list_captains(db.pool(), &actor).await?;

    Ok(Json(captains))
}

#[utoipa::path(
    post,
    path = "/api/admin/captains",
    request_body = CreateCaptainRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Captain created", body = Captain),
        (status = 400, description = "Validation error"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required"),
        (status = 409, description = "Email already exists or team does not exist")
    ),
    tag = "admin"
)]
pub async fn create_captain(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    payload: Result<Json<CreateCaptainRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let captain = services::create_captain(db.pool(), &actor, &req).await?;

    Ok((StatusCode::CREATED, Json(captain)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/admin/captains/{id}",
    params(
        ("id" = Uuid, Path, description = "Captain ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 204, description = "Captain deleted"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Super admin access required"),
        (status = 404, description = "Captain not found")
    ),
    tag = "admin"
)]
pub async fn delete_captain(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(captain_id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_captain(db.pool(), &actor, captain_id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
