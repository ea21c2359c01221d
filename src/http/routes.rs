use axum::{routing::get, routing::post, routing::put, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn feed() -> Router<AppState> {
    Router::new()
        .route("/feed", get(handlers::home_feed))
        .route("/trending", get(handlers::trending_feed))
}

pub fn discovery() -> Router<AppState> {
    Router::new()
        .route("/trending/overview", get(handlers::trending_overview))
        .route("/leaderboard", get(handlers::get_leaderboard))
        .route("/sidebar", get(handlers::get_sidebar))
        .route("/categories", get(handlers::list_categories))
}

pub fn sessions() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(handlers::create_session))
        .route("/session/feed", get(handlers::session_feed))
        .route("/session/feed", put(handlers::select_feed))
        .route("/session/feed/more", post(handlers::load_more_feed))
        .route("/session/tips/:id", post(handlers::show_tip))
        .route(
            "/session/onboarding/dismiss",
            post(handlers::dismiss_onboarding),
        )
        .route("/session/theme", get(handlers::get_theme))
        .route("/session/theme", put(handlers::set_theme))
}

pub fn posts() -> Router<AppState> {
    Router::new()
        .route("/posts/:id", get(handlers::get_post))
        .route("/posts/:id/vote", post(handlers::vote_post))
        .route("/posts/:id/bookmark", post(handlers::bookmark_post))
        .route("/posts/:id/share", post(handlers::share_post))
        .route("/posts/:id/comments", get(handlers::list_post_comments))
        .route("/posts/:id/comments", post(handlers::comment_post))
        .route(
            "/posts/:id/comments/:comment_id/vote",
            post(handlers::vote_comment),
        )
}

pub fn submissions() -> Router<AppState> {
    Router::new().route("/submissions", post(handlers::submit_post))
}
