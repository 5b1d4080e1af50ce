use axum::routing::get;
use axum::Router;

use crate::handlers::schedule;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(schedule::search_schedules).post(schedule::create_schedule),
        )
        .route(
            "/{id}",
            get(schedule::get_schedule)
                .put(schedule::update_schedule)
                .delete(schedule::cancel_schedule),
        )
        .route("/{id}/seats", get(schedule::get_schedule_seats))
}
