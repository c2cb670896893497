use axum::{
    Extension, Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        fixture::{FixtureFilter, FixtureResponse},
        result::{ClearResultResponse, SubmitResultRequest, SubmitResultResponse},
    },
    services::permissions::Actor,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/fixtures",
    params(FixtureFilter),
    responses(
        (status = 200, description = "Fixtures ordered by kick-off", body = Vec<FixtureResponse>),
        (status = 400, description = "Invalid filter")
    ),
    tag = "fixtures"
)]
pub async fn list_fixtures(
    State(db): State<Database>,
    Query(filter): Query<FixtureFilter>,
) -> Result<Json<Vec<FixtureResponse>>, WebError> {
    filter.validate().map_err(WebError::BadRequest)?;

    let fixtures = services::list_fixtures(db.pool(), &filter).await?;

    Ok(Json(fixtures))
}

#[utoipa::path(
    get,
    path = "/api/fixtures/{id}",
    params(
        ("id" = Uuid, Path, description = "Fixture ID")
    ),
    responses(
        (status = 200, description = "Fixture found", body = FixtureResponse),
        (status = 404, description = "Fixture not found")
    ),
    tag = "fixtures"
)]
pub async fn get_fixture(
    State(db): State<Database>,
    Path(fixture_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let fixture = services::get_fixture(db.pool(), fixture_id).await?;

    Ok(Json(fixture).into_response())
}

#[utoipa::path(
    post,
    path = "/api/fixtures/{id}/result",
    params(
        ("id" = Uuid, Path, description = "Fixture ID")
    ),
    request_body = SubmitResultRequest,
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Result recorded and team points adjusted", body = SubmitResultResponse),
        (status = 400, description = "Invalid score"),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Fixture is outside the caller's divisions"),
        (status = 404, description = "Fixture not found"),
        (status = 409, description = "Points would go below zero")
    ),
    tag = "fixtures"
)]
pub async fn submit_result(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(fixture_id): Path<Uuid>,
    payload: Result<Json<SubmitResultRequest>, JsonRejection>,
) -> Result<Response, WebError> {
    let Json(req) = payload?;
    req.validate()?;

    let submitted = services::submit_result(db.pool(), &actor, fixture_id, req).await?;

    Ok(Json(SubmitResultResponse::from(submitted)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/fixtures/{id}/result",
    params(
        ("id" = Uuid, Path, description = "Fixture ID")
    ),
    security(
        ("session_cookie" = [])
    ),
    responses(
        (status = 200, description = "Result removed and its points reversed, or nothing to clear", body = ClearResultResponse),
        (status = 401, description = "No valid session"),
        (status = 403, description = "Fixture is outside the caller's divisions"),
        (status = 404, description = "Fixture not found")
    ),
    tag = "fixtures"
)]
pub async fn clear_result(
    State(db): State<Database>,
    Extension(actor): Extension<Actor>,
    Path(fixture_id): Path<Uuid>,
) -> Result<Response, WebError> {
    let outcome = services::clear_result(db.pool(), &actor, fixture_id).await?;

    Ok(Json(ClearResultResponse::from(outcome)).into_response())
}
