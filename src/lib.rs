use axum::{middleware, routing::post, Router};
use model::AppState;
use std::sync::Arc;

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod model;
pub mod routes;

pub fn router(state: Arc<AppState>) -> Router {
    let protected = Router::new()
        .route(
            "/api/dev/projects",
            post(routes::create_project).get(routes::list_projects),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            routes::authenticate,
        ));

    Router::new()
        .route("/api/auth/login", post(routes::login))
        .route("/api/auth/logout", post(routes::logout))
        .merge(protected)
        .with_state(state)
}
