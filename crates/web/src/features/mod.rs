pub mod admin;
pub mod auth;
pub mod fixtures;
pub mod league_tables;
pub mod pool_nominations;
