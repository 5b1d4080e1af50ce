use axum::routing::{get, post};
use axum::Router;

use crate::handlers::schedule_pattern;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(schedule_pattern::list_patterns).post(schedule_pattern::create_pattern),
        )
        .route(
            "/{id}",
            get(schedule_pattern::get_pattern)
                .put(schedule_pattern::update_pattern)
                .delete(schedule_pattern::delete_pattern),
        )
        .route("/{id}/generate", post(schedule_pattern::generate_schedules))
}
