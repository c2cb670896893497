pub mod account;
pub mod fixture;
pub mod league_table;
pub mod ledger;
pub mod maintenance;
pub mod pool_nomination;

#[cfg(test)]
pub mod memory;
#[cfg(test)]
pub(crate) mod seed;
