use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::league_table::{LeagueTableResponse, StandingEntry};
use crate::error::Result;
use crate::models::Division;

#[derive(Debug, FromRow)]
struct StandingRow {
    team_id: Uuid,
    division_id: Uuid,
    name: String,
    points: i32,
    played: i64,
}

pub struct LeagueTableRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> LeagueTableRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Every division with its teams ordered by points, then name
    pub async fn list(&self) -> Result<Vec<LeagueTableResponse>> {
        let divisions = sqlx::query_as::<_, Division>(
            "SELECT division_id, name, sport FROM divisions ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        let rows = sqlx::query_as::<_, StandingRow>(
            r#"
            SELECT t.team_id, t.division_id, t.name, t.points,
                   COUNT(r.result_id) AS played
            FROM teams t
            LEFT JOIN fixtures f
                ON f.home_team_id = t.team_id OR f.away_team_id = t.team_id
            LEFT JOIN results r ON r.fixture_id = f.fixture_id
            GROUP BY t.team_id, t.division_id, t.name, t.points
            ORDER BY t.points DESC, t.name ASC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(build_tables(divisions, rows))
    }
}

fn build_tables(divisions: Vec<Division>, rows: Vec<StandingRow>) -> Vec<LeagueTableResponse> {
    divisions
        .into_iter()
        .map(|division| {
            let standings = rows
                .iter()
                .filter(|row| row.division_id == division.division_id)
                .zip(1u32..)
                .map(|(row, position)| StandingEntry {
                    position,
                    team_id: row.team_id,
                    name: row.name.clone(),
                    points: row.points,
                    played: row.played,
                })
                .collect();

            LeagueTableResponse {
                division_id: division.division_id,
                name: division.name,
                sport: division.sport,
                standings,
            }
        })
        .collect()
}
