use super::models::{FORMAT_VERSION, ScheduleFormat};
use crate::{ImporterError, Result};
use std::collections::{HashMap, HashSet};
use storage::models::Sport;
use tracing::warn;

pub struct ScheduleValidator;

impl ScheduleValidator {
    pub fn validate(schedule: &ScheduleFormat) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if schedule.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                schedule.format_version, FORMAT_VERSION
            ));
        }

        if schedule.divisions.is_empty() {
            report
                .errors
                .push("At least one division is required".to_string());
        }

        let mut division_names = HashSet::new();
        for division in &schedule.divisions {
            if division.name.trim().is_empty() {
                report
                    .errors
                    .push("Division name cannot be empty".to_string());
            }
            if Sport::try_from(division.sport.clone()).is_err() {
                report.errors.push(format!(
                    "Division '{}' has unknown sport: '{}'. Must be darts, pool or dominoes",
                    division.name, division.sport
                ));
            }
            if !division_names.insert(division.name.trim()) {
                report
                    .errors
                    .push(format!("Duplicate division name: '{}'", division.name));
            }
        }

        if schedule.teams.is_empty() {
            report.errors.push("At least one team is required".to_string());
        }

        let mut appearances: HashMap<&str, usize> = HashMap::new();
        for team in &schedule.teams {
            if team.trim().is_empty() {
                report.errors.push("Team name cannot be empty".to_string());
            } else if appearances.insert(team.trim(), 0).is_some() {
                report
                    .errors
                    .push(format!("Duplicate team name: '{}'", team));
            }
        }

        let mut weeks = HashSet::new();
        for week in &schedule.weeks {
            if week.week < 1 {
                report.errors.push(format!(
                    "Invalid week number: {}. Weeks must be >= 1",
                    week.week
                ));
            }
            if !weeks.insert(week.week) {
                report
                    .errors
                    .push(format!("Week {} is listed more than once", week.week));
            }
            if week.games.is_empty() {
                report
                    .warnings
                    .push(format!("Week {} has no games", week.week));
            }

            let mut playing = HashSet::new();
            for (home, away) in &week.games {
                for team in [home, away] {
                    match appearances.get_mut(team.trim()) {
                        Some(count) => *count += 1,
                        None => report.errors.push(format!(
                            "Week {}: unknown team '{}'",
                            week.week, team
                        )),
                    }
                }

                if home.trim() == away.trim() {
                    report.errors.push(format!(
                        "Week {}: '{}' cannot play itself",
                        week.week, home
                    ));
                    continue;
                }

                for team in [home, away] {
                    if !playing.insert(team.trim()) {
                        report.warnings.push(format!(
                            "Week {}: '{}' plays more than once",
                            week.week, team
                        ));
                    }
                }
            }
        }

        for team in &schedule.teams {
            if appearances.get(team.trim()) == Some(&0) {
                report
                    .warnings
                    .push(format!("Team '{}' has no fixtures", team));
            }
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::models::{DivisionData, WeekData};

    fn game(home: &str, away: &str) -> (String, String) {
        (home.to_string(), away.to_string())
    }

    fn schedule() -> ScheduleFormat {
        ScheduleFormat {
            format_version: FORMAT_VERSION.to_string(),
            divisions: vec![
                DivisionData {
                    name: "Open Darts".to_string(),
                    sport: "Darts".to_string(),
                },
                DivisionData {
                    name: "Dominoes".to_string(),
                    sport: "Dominoes".to_string(),
                },
            ],
            teams: vec![
                "County".to_string(),
                "Furness".to_string(),
                "Lonsdale".to_string(),
                "Cartmel".to_string(),
            ],
            weeks: vec![
                WeekData {
                    week: 2,
                    games: vec![game("County", "Furness"), game("Lonsdale", "Cartmel")],
                },
                WeekData {
                    week: 3,
                    games: vec![game("Furness", "Lonsdale"), game("Cartmel", "County")],
                },
            ],
        }
    }

    fn errors_of(schedule: &ScheduleFormat) -> String {
        match ScheduleValidator::validate(schedule) {
            Err(ImporterError::ValidationError(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other.map(|r| r.warnings)),
        }
    }

    #[test]
    fn test_valid_schedule_passes_without_warnings() {
        let report = ScheduleValidator::validate(&schedule()).unwrap();
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_unsupported_version() {
        let mut s = schedule();
        s.format_version = "0.9.0".to_string();
        assert!(errors_of(&s).contains("Unsupported format version"));
    }

    #[test]
    fn test_unknown_team_in_game() {
        let mut s = schedule();
        s.weeks[0].games.push(game("County", "Pendle"));
        assert!(errors_of(&s).contains("unknown team 'Pendle'"));
    }

    #[test]
    fn test_team_cannot_play_itself() {
        let mut s = schedule();
        s.weeks[1].games.push(game("Furness", "Furness"));
        assert!(errors_of(&s).contains("'Furness' cannot play itself"));
    }

    #[test]
    fn test_duplicate_division_and_unknown_sport() {
        let mut s = schedule();
        s.divisions.push(DivisionData {
            name: "Open Darts".to_string(),
            sport: "snooker".to_string(),
        });
        let msg = errors_of(&s);
        assert!(msg.contains("Duplicate division name: 'Open Darts'"));
        assert!(msg.contains("unknown sport: 'snooker'"));
    }

    #[test]
    fn test_names_differing_only_in_whitespace_are_duplicates() {
        let mut s = schedule();
        s.teams.push(" Furness".to_string());

        assert!(errors_of(&s).contains("Duplicate team name: ' Furness'"));
    }

    #[test]
    fn test_games_may_pad_team_names() {
        let mut s = schedule();
        s.weeks[0].games = vec![game(" County", "Furness "), game("Lonsdale", "Cartmel")];

        let report = ScheduleValidator::validate(&s).unwrap();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_names_are_errors() {
        let mut s = schedule();
        s.teams.push(" ".to_string());
        s.divisions[0].name = String::new();
        let msg = errors_of(&s);
        assert!(msg.contains("Team name cannot be empty"));
        assert!(msg.contains("Division name cannot be empty"));
    }

    #[test]
    fn test_idle_team_and_double_booking_are_warnings() {
        let mut s = schedule();
        s.teams.push("Graduate".to_string());
        s.weeks[0].games.push(game("County", "Cartmel"));

        let report = ScheduleValidator::validate(&s).unwrap();

        assert!(report.warnings.contains(&"Team 'Graduate' has no fixtures".to_string()));
        assert!(
            report
                .warnings
                .contains(&"Week 2: 'County' plays more than once".to_string())
        );
    }

    #[test]
    fn test_bundled_season_schedule_is_valid() {
        let s: ScheduleFormat =
            serde_json::from_str(include_str!("../../schedules/league-2025-26.json")).unwrap();

        let report = ScheduleValidator::validate(&s).unwrap();

        assert_eq!(s.divisions.len(), 6);
        assert_eq!(s.teams.len(), 9);
        assert_eq!(s.first_week(), Some(2));
        assert!(
            report
                .warnings
                .contains(&"Week 3: 'Pendle' plays more than once".to_string())
        );
    }
}
