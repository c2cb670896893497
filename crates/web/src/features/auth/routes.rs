use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{login, logout, me};
use crate::middleware::auth::{AuthState, require_session};

pub fn routes(auth: AuthState) -> Router<Database> {
    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(auth.clone(), require_session));

    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected)
        .with_state(auth)
}
