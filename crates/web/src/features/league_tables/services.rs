use sqlx::PgPool;
use storage::{
    dto::league_table::LeagueTableResponse, error::Result,
    repository::league_table::LeagueTableRepository,
};

/// Every division's table, teams ordered by points
pub async fn list_league_tables(pool: &PgPool) -> Result<Vec<LeagueTableResponse>> {
    let repo = LeagueTableRepository::new(pool);
    repo.list().await
}
