use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use storage::Database;

use super::handlers::{
    create_admin, create_captain, delete_admin, delete_captain, list_admins, list_captains,
    reset_points,
};
use crate::middleware::auth::{AuthState, require_session};

pub fn routes(auth: AuthState) -> Router<Database> {
    Router::new()
        .route("/reset-points", post(reset_points))
        .route("/admins", get(list_admins).post(create_admin))
        .route("/admins/:id", delete(delete_admin))
        .route("/captains", get(list_captains).post(create_captain))
        .route("/captains/:id", delete(delete_captain))
        .route_layer(middleware::from_fn_with_state(auth, require_session))
}
