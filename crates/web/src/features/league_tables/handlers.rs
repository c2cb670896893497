use axum::{Json, extract::State};
use storage::{Database, dto::league_table::LeagueTableResponse};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/league-tables",
    responses(
        (status = 200, description = "Standings for every division", body = Vec<LeagueTableResponse>)
    ),
    tag = "league-tables"
)]
pub async fn list_league_tables(
    State(db): State<Database>,
) -> Result<Json<Vec<LeagueTableResponse>>, WebError> {
    let tables = services::list_league_tables(db.pool()).await?;

    Ok(Json(tables))
}
