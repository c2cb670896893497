//! Women's+ Pool nominations.
//!
//! A fixture has [`NOMINATION_GAMES`] games. For each game one team names its
//! player: the away team on odd games, the home team on even ones. A
//! nomination cannot be changed once made.

use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{NominationFixture, PoolNomination, Sport};

pub const NOMINATION_DIVISION: &str = "Women's+ Pool";

pub const NOMINATION_GAMES: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
        }
    }
}

/// Which team names the player for `game_number` (1-based).
pub fn nominating_side(game_number: i32) -> Side {
    if game_number % 2 == 1 {
        Side::Away
    } else {
        Side::Home
    }
}

/// Checks that `team_id` may lock a nomination for `game_number` now, given
/// the nominations already locked for the fixture. Returns the team's side.
pub fn check_nomination(
    fixture: &NominationFixture,
    locked: &[PoolNomination],
    team_id: Uuid,
    game_number: i32,
) -> Result<Side> {
    if fixture.division_name != NOMINATION_DIVISION || fixture.sport != Sport::Pool {
        return Err(StorageError::InvalidArgument(format!(
            "Nominations are only taken for {} fixtures",
            NOMINATION_DIVISION
        )));
    }

    if !(1..=NOMINATION_GAMES).contains(&game_number) {
        return Err(StorageError::InvalidArgument(format!(
            "Game number must be between 1 and {}",
            NOMINATION_GAMES
        )));
    }

    let side = if team_id == fixture.home_team_id {
        Side::Home
    } else if team_id == fixture.away_team_id {
        Side::Away
    } else {
        return Err(StorageError::Forbidden(
            "your team does not play in this fixture".to_string(),
        ));
    };

    let turn = nominating_side(game_number);
    if side != turn {
        return Err(StorageError::Forbidden(format!(
            "the {} team nominates for game {}",
            turn.as_str(),
            game_number
        )));
    }

    if locked
        .iter()
        .any(|n| n.team_id == team_id && n.game_number == game_number)
    {
        return Err(StorageError::ConstraintViolation(format!(
            "Nomination for game {} is already locked",
            game_number
        )));
    }

    Ok(side)
}
