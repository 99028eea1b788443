pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod services;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use db::models;

#[derive(Clone)]
pub struct AppState {
    pub db: db::Database,
}

pub fn build_router(state: AppState) -> Router {
    let api_router = Router::new()
        .nest("/login", routes::auth::router())
        .nest("/users", routes::users::router())
        .nest("/projects", routes::projects::router())
        .nest("/issues", routes::issues::router());

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_router)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn health_check() -> &'static str {
    "OK"
}
