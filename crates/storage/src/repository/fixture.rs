use chrono::NaiveDateTime;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::dto::fixture::{DivisionInfo, FixtureFilter, FixtureResponse, ResultInfo, TeamInfo};
use crate::error::{Result, StorageError};
use crate::models::{Division, Sport};

#[derive(Debug, FromRow)]
struct FixtureRow {
    fixture_id: Uuid,
    week: i32,
    scheduled_at: NaiveDateTime,
    division_id: Uuid,
    division_name: String,
    #[sqlx(try_from = "String")]
    sport: Sport,
    home_team_id: Uuid,
    home_team_name: String,
    away_team_id: Uuid,
    away_team_name: String,
    home_score: Option<i32>,
    away_score: Option<i32>,
    details: Option<String>,
    result_updated_at: Option<NaiveDateTime>,
}

impl From<FixtureRow> for FixtureResponse {
    fn from(row: FixtureRow) -> Self {
        let result = match (row.home_score, row.away_score, row.result_updated_at) {
            (Some(home_score), Some(away_score), Some(updated_at)) => Some(ResultInfo {
                home_score,
                away_score,
                details: row.details,
                updated_at,
            }),
            _ => None,
        };

        Self {
            fixture_id: row.fixture_id,
            week: row.week,
            scheduled_at: row.scheduled_at,
            division: DivisionInfo {
                division_id: row.division_id,
                name: row.division_name,
                sport: row.sport,
            },
            home_team: TeamInfo {
                team_id: row.home_team_id,
                name: row.home_team_name,
            },
            away_team: TeamInfo {
                team_id: row.away_team_id,
                name: row.away_team_name,
            },
            result,
        }
    }
}

pub struct FixtureRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FixtureRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List fixtures in date order, optionally narrowed to a division or week
    pub async fn list(&self, filter: &FixtureFilter) -> Result<Vec<FixtureResponse>> {
        let rows = sqlx::query_as::<_, FixtureRow>(
            r#"
            SELECT f.fixture_id, f.week, f.scheduled_at,
                   d.division_id, d.name AS division_name, d.sport,
                   h.team_id AS home_team_id, h.name AS home_team_name,
                   a.team_id AS away_team_id, a.name AS away_team_name,
                   r.home_score, r.away_score, r.details, r.updated_at AS result_updated_at
            FROM fixtures f
            JOIN divisions d ON d.division_id = f.division_id
            JOIN teams h ON h.team_id = f.home_team_id
            JOIN teams a ON a.team_id = f.away_team_id
            LEFT JOIN results r ON r.fixture_id = f.fixture_id
            WHERE ($1::uuid IS NULL OR f.division_id = $1)
              AND ($2::int IS NULL OR f.week = $2)
            ORDER BY f.scheduled_at, d.name, h.name
            "#,
        )
        .bind(filter.division_id)
        .bind(filter.week)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(FixtureResponse::from).collect())
    }

    /// Get one fixture with its teams and result
    pub async fn find_detailed(&self, fixture_id: Uuid) -> Result<FixtureResponse> {
        let row = sqlx::query_as::<_, FixtureRow>(
            r#"
            SELECT f.fixture_id, f.week, f.scheduled_at,
                   d.division_id, d.name AS division_name, d.sport,
                   h.team_id AS home_team_id, h.name AS home_team_name,
                   a.team_id AS away_team_id, a.name AS away_team_name,
                   r.home_score, r.away_score, r.details, r.updated_at AS result_updated_at
            FROM fixtures f
            JOIN divisions d ON d.division_id = f.division_id
            JOIN teams h ON h.team_id = f.home_team_id
            JOIN teams a ON a.team_id = f.away_team_id
            LEFT JOIN results r ON r.fixture_id = f.fixture_id
            WHERE f.fixture_id = $1
            "#,
        )
        .bind(fixture_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(FixtureResponse::from(row))
    }

    /// Division a fixture is played in, for permission checks
    pub async fn find_division(&self, fixture_id: Uuid) -> Result<Division> {
        let division = sqlx::query_as::<_, Division>(
            r#"
            SELECT d.division_id, d.name, d.sport
            FROM fixtures f
            JOIN divisions d ON d.division_id = f.division_id
            WHERE f.fixture_id = $1
            "#,
        )
        .bind(fixture_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(division)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed;

    #[sqlx::test]
    async fn test_list_filters_by_division_and_week(pool: PgPool) {
        let seeded = seed::fixture(&pool).await;
        let repo = FixtureRepository::new(&pool);

        let all = repo.list(&FixtureFilter::default()).await.unwrap();
        let week_two = repo
            .list(&FixtureFilter {
                division_id: Some(seeded.division.division_id),
                week: Some(2),
            })
            .await
            .unwrap();
        let week_three = repo
            .list(&FixtureFilter {
                division_id: None,
                week: Some(3),
            })
            .await
            .unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(week_two.len(), 1);
        assert!(week_three.is_empty());
    }

    #[sqlx::test]
    async fn test_detail_and_division_lookups(pool: PgPool) {
        let seeded = seed::fixture(&pool).await;
        let repo = FixtureRepository::new(&pool);

        let detailed = repo.find_detailed(seeded.fixture_id).await.unwrap();
        let division = repo.find_division(seeded.fixture_id).await.unwrap();

        assert!(detailed.result.is_none());
        assert_eq!(division, seeded.division);
        assert!(matches!(
            repo.find_detailed(Uuid::new_v4()).await,
            Err(StorageError::NotFound)
        ));
    }
}
