pub mod credentials;
pub mod ledger_store;
pub mod permissions;
pub mod points_ledger;
pub mod pool_nominations;
