use axum::{Router, routing::get};
use storage::Database;

use super::handlers::list_league_tables;

pub fn routes() -> Router<Database> {
    Router::new().route("/", get(list_league_tables))
}
