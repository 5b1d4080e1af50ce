use axum::routing::get;
use axum::Router;

use crate::handlers::{route, stop};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(route::list_routes).post(route::create_route))
        .route(
            "/{id}",
            get(route::get_route)
                .put(route::update_route)
                .delete(route::delete_route),
        )
        .route("/{id}/stops", get(stop::list_stops).post(stop::create_stop))
        .route(
            "/{id}/stops/{stop_id}",
            axum::routing::put(stop::update_stop).delete(stop::delete_stop),
        )
}
