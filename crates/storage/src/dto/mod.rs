pub mod account;
pub mod fixture;
pub mod league_table;
pub mod pool_nomination;
pub mod result;
