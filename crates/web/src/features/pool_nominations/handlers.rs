use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database, dto::pool_nomination::NominatePlayerRequest, models::PoolNomination,
    services::permissions::Actor,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/fixtures/{id}/nominations",
    params(
        ("id" = Uuid, Path, description = "Fixture ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Locked nominations of both teams", body = Vec<PoolNomination>),
        (status = 401, description = "No valid session"),
        (status = 404, description = "Fixture not found")
    ),
    tag = "pool-nominations"
)]
pub async fn list_nominations(
    State(db): State<Database>,
    Path(fixture_id): Path<Uuid>,
) -> Result<Json<Vec<PoolNomination>>, WebError> {
    let nominations = services::list_nominations(db.pool(), fixture_id).await?;

    Ok(Json(nominations))
}

#[utoipa::path(
    post,
    path = "/api/fixtures/{id}/nominations",
    params(
        ("id" = Uuid, Path, description = "Fixture ID")
    ),
    request_body = NominatePlayerRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 201, description = "Nomination locked", body = PoolNomination),
        (status = 400, description = "Not a Women's+ Pool fixture or invalid game"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Not a captain in this fixture, or not this team's turn"),
        (status = 404, description = "Fixture not found"),
        (status = 409, description = "Nomination already locked")
    ),
    tag = "pool-nominations"
)]
pub async fn nominate_player(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(fixture_id): Path<Uuid>,
    payload: Result<Json<NominatePlayerRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let nomination = services::nominate_player(db.pool(), &actor, fixture_id, &req).await?;

    Ok((StatusCode::CREATED, Json(nomination)).into_response())
}
