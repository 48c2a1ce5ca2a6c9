use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all Threadify endpoints.
pub fn build_router(state: AppState) -> Router {
    let photo_limit = state.board.photos.max_bytes();

    Router::new()
        .route("/health", get(handler::health))
        .route("/sign-up", post(handler::sign_up))
        .route("/sign-in", post(handler::sign_in))
        .route("/change-password", patch(handler::change_password))
        .route("/sign-out", delete(handler::sign_out))
        .route(
            "/threads",
            get(handler::list_threads).post(handler::create_thread),
        )
        .route(
            "/threads/:id",
            get(handler::show_thread)
                .patch(handler::update_thread)
                .delete(handler::delete_thread),
        )
        .route("/threads/:id/comments", post(handler::add_comment))
        .route("/threads/:id/comment", post(handler::add_comment))
        .route(
            "/threads/:id/comments/:comment_id",
            delete(handler::remove_comment),
        )
        .route("/threads/:id/like", post(handler::toggle_like))
        .route(
            "/profile-photo",
            put(handler::upload_photo)
                .get(handler::fetch_photo)
                .delete(handler::remove_photo)
                .layer(DefaultBodyLimit::max(photo_limit)),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
