use axum::Router;
use tower_http::cors::CorsLayer;

use crate::AppState;

mod error;
mod handlers;
mod routes;
mod session;

pub use error::AppError;
pub use session::{SessionId, SESSION_HEADER};

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health())
        .merge(routes::feed())
        .merge(routes::discovery())
        .merge(routes::sessions())
        .merge(routes::posts())
        .merge(routes::submissions())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
