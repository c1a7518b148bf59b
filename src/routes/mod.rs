//! HTTP Routes
//!
//! Reads are public. Every mutating route sits behind [`require_admin`].

mod auth_routes;
mod member_routes;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::auth::require_admin;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let admin = from_fn_with_state(state.clone(), require_admin);

    Router::new()
        .route("/healthz", get(healthz_handler))
        .route(
            "/api/members",
            get(member_routes::list_members)
                .merge(post(member_routes::create_member).route_layer(admin.clone())),
        )
        .route("/api/members/teams", get(member_routes::list_teams))
        .route(
            "/api/members/reorder",
            put(member_routes::reorder_members).route_layer(admin.clone()),
        )
        .route(
            "/api/members/teams/reorder",
            put(member_routes::reorder_teams).route_layer(admin.clone()),
        )
        .route(
            "/api/members/teams/:team/reorder",
            put(member_routes::reorder_team_members).route_layer(admin.clone()),
        )
        .route(
            "/api/members/:id",
            get(member_routes::get_member).merge(
                put(member_routes::update_member)
                    .merge(delete(member_routes::delete_member))
                    .route_layer(admin),
            ),
        )
        .route("/api/auth/login", post(auth_routes::login))
        .route("/api/auth/logout", post(auth_routes::logout))
        .route("/api/auth/session", get(auth_routes::session))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
