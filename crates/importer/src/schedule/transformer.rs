use super::models::ScheduleFormat;
use crate::{ImporterError, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::{PgPool, Postgres, Transaction};
use std::collections::HashMap;
use storage::models::Sport;
use tracing::{debug, info};
use uuid::Uuid;

/// Fixtures are played at midday.
const KICK_OFF: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(time) => time,
    None => panic!("invalid kick-off time"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub divisions: usize,
    pub teams: usize,
    pub fixtures: usize,
}

pub struct ScheduleTransformer<'a> {
    pool: &'a PgPool,
}

impl<'a> ScheduleTransformer<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Writes the whole schedule in one transaction. Divisions and teams are
    /// upserted so re-running an import keeps existing points; fixtures are
    /// always inserted.
    pub async fn import_to_database(
        &self,
        schedule: &ScheduleFormat,
        start_date: NaiveDate,
    ) -> Result<ImportSummary> {
        let first_week = schedule
            .first_week()
            .ok_or_else(|| ImporterError::ImportError("Schedule has no weeks".to_string()))?;

        let mut tx = self.pool.begin().await?;
        let mut summary = ImportSummary {
            divisions: 0,
            teams: 0,
            fixtures: 0,
        };

        for division in &schedule.divisions {
            let sport = Sport::try_from(division.sport.clone())
                .map_err(|e| ImporterError::ValidationError(e.to_string()))?;
            let division_id = self
                .upsert_division(division.name.trim(), sport, &mut tx)
                .await?;
            summary.divisions += 1;

            let mut team_ids = HashMap::new();
            for team in &schedule.teams {
                let team_id = self.upsert_team(division_id, team.trim(), &mut tx).await?;
                team_ids.insert(team.trim(), team_id);
                summary.teams += 1;
            }

            for week in &schedule.weeks {
                let scheduled_at = fixture_date(start_date, first_week, week.week);

                for (home, away) in &week.games {
                    let (Some(&home_id), Some(&away_id)) =
                        (team_ids.get(home.trim()), team_ids.get(away.trim()))
                    else {
                        return Err(ImporterError::ImportError(format!(
                            "Week {}: '{}' v '{}' names a team outside the schedule",
                            week.week, home, away
                        )));
                    };

                    self.insert_fixture(division_id, home_id, away_id, scheduled_at, week.week, &mut tx)
                        .await?;
                    summary.fixtures += 1;
                }
            }

            debug!(
                division = %division.name,
                fixtures = schedule.games_per_division(),
                "Division imported"
            );
        }

        tx.commit().await?;
        info!(
            divisions = summary.divisions,
            teams = summary.teams,
            fixtures = summary.fixtures,
            "Schedule imported"
        );

        Ok(summary)
    }

    async fn upsert_division(
        &self,
        name: &str,
        sport: Sport,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Uuid> {
        let division_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO divisions (name, sport)
            VALUES ($1, $2)
            ON CONFLICT (name)
            DO UPDATE SET sport = EXCLUDED.sport
            RETURNING division_id
            "#,
        )
        .bind(name)
        .bind(sport.as_str())
        .fetch_one(&mut **tx)
        .await?;

        Ok(division_id)
    }

    async fn upsert_team(
        &self,
        division_id: Uuid,
        name: &str,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Uuid> {
        // The no-op update lets RETURNING report existing rows too
        let team_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO teams (division_id, name, points)
            VALUES ($1, $2, 0)
            ON CONFLICT (division_id, name)
            DO UPDATE SET name = EXCLUDED.name
            RETURNING team_id
            "#,
        )
        .bind(division_id)
        .bind(name)
        .fetch_one(&mut **tx)
        .await?;

        Ok(team_id)
    }

    async fn insert_fixture(
        &self,
        division_id: Uuid,
        home_team_id: Uuid,
        away_team_id: Uuid,
        scheduled_at: NaiveDateTime,
        week: i32,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fixtures (division_id, home_team_id, away_team_id, scheduled_at, week)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(division_id)
        .bind(home_team_id)
        .bind(away_team_id)
        .bind(scheduled_at)
        .bind(week)
        .execute(&mut **tx)
        .await?;

        Ok(())
    }
}

/// The first listed week is played on `start_date`, each later week seven
/// days on.
pub fn fixture_date(start_date: NaiveDate, first_week: i32, week: i32) -> NaiveDateTime {
    let date = start_date + Duration::days(7 * i64::from(week - first_week));
    date.and_time(KICK_OFF)
}

/// `today` when it is a Monday, otherwise the Monday after.
pub fn next_monday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today + Duration::days(i64::from(days_ahead))
}
