use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{clear_result, get_fixture, list_fixtures, submit_result};
use crate::middleware::auth::{AuthState, require_session};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/:id/result", post(submit_result).delete(clear_result))
        .route_layer(middleware::from_fn_with_state(auth, require_session));

    Router::new()
        .route("/", get(list_fixtures))
        .route("/:id", get(get_fixture))
        .merge(protected)
}
