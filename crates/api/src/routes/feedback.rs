use axum::routing::get;
use axum::Router;

use crate::handlers::feedback;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(feedback::list_feedback).post(feedback::create_feedback),
        )
        .route("/{id}", axum::routing::delete(feedback::delete_feedback))
}
