mod account;
mod division;
mod fixture;
mod match_result;
mod pool_nomination;
mod team;

pub use account::{Admin, AdminType, Captain, CaptainRole};
pub use division::{Division, Sport, UnknownVariant};
pub use fixture::{Fixture, FixtureWithResult};
pub use match_result::MatchResult;
pub use pool_nomination::{NominationFixture, PoolNomination};
pub use team::Team;
