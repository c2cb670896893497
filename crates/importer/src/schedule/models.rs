use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: &str = "1.0.0";

/// A season's fixture list. Every division fields one team per college and
/// plays the same weekly pairings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleFormat {
    pub format_version: String,
    pub divisions: Vec<DivisionData>,
    pub teams: Vec<String>,
    pub weeks: Vec<WeekData>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DivisionData {
    pub name: String,
    pub sport: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekData {
    pub week: i32,
    /// `[home, away]` team names
    pub games: Vec<(String, String)>,
}

impl ScheduleFormat {
    pub fn first_week(&self) -> Option<i32> {
        self.weeks.iter().map(|w| w.week).min()
    }

    pub fn games_per_division(&self) -> usize {
        self.weeks.iter().map(|w| w.games.len()).sum()
    }
}
