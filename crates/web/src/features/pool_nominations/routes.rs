use axum::{Router, middleware, routing::get};
use storage::Database;

use super::handlers::{list_nominations, nominate_player};
use crate::middleware::auth::{AuthState, require_session};

/// Mounted under `/api/fixtures`
pub fn routes(auth: AuthState) -> Router<Database> {
    Router::new()
        .route(
            "/:id/nominations",
            get(list_nominations).post(nominate_player),
        )
        .route_layer(middleware::from_fn_with_state(auth, require_session))
}
