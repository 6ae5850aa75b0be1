use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
mod health;
pub mod tasks;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let task_router = Router::new()
        .route("/", get(tasks::routes::list).post(tasks::routes::create))
        .route(
            "/{id}",
            get(tasks::routes::get)
                .put(tasks::routes::update)
                .delete(tasks::routes::delete),
        );

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/tasks", task_router)
}

/// The full service: routes, browser CORS, request tracing and state.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "Task tracker API"
}
