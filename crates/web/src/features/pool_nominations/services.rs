use sqlx::PgPool;
use storage::{
    dto::pool_nomination::NominatePlayerRequest,
    error::{Result, StorageError},
    models::PoolNomination,
    repository::pool_nomination::PoolNominationRepository,
    services::{
        permissions::{Actor, Principal},
        pool_nominations::check_nomination,
    },
};
use uuid::Uuid;

pub async fn list_nominations(pool: &PgPool, fixture_id: Uuid) -> Result<Vec<PoolNomination>> {
    let repo = PoolNominationRepository::new(pool);
    repo.find_fixture(fixture_id).await?;
    repo.list_for_fixture(fixture_id).await
}

/// Lock the caller's team's player for one game of a Women's+ Pool fixture
pub async fn nominate_player(
    pool: &PgPool,
    actor: &Actor,
    fixture_id: Uuid,
    req: &NominatePlayerRequest,
) -> Result<PoolNomination> {
    let Principal::Captain(captain_id) = actor.principal() else {
        return Err(StorageError::Forbidden(
            "only team captains can nominate players".to_string(),
        ));
    };

    let player_name = req.player_name.trim();
    if player_name.is_empty() {
        return Err(StorageError::InvalidArgument(
            "Player name cannot be blank".to_string(),
        ));
    }

    let repo = PoolNominationRepository::new(pool);
    let team_id = repo.captain_team(captain_id).await?;
    let fixture = repo.find_fixture(fixture_id).await?;
    let locked = repo.list_for_fixture(fixture_id).await?;

    let side = check_nomination(&fixture, &locked, team_id, req.game_number)?;
    let nomination = repo
        .lock(fixture_id, team_id, req.game_number, player_name)
        .await?;

    tracing::info!(
        %fixture_id,
        %team_id,
        side = side.as_str(),
        game_number = req.game_number,
        "Pool nomination locked"
    );

    Ok(nomination)
}
