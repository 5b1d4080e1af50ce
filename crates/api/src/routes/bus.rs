use axum::routing::get;
use axum::Router;

use crate::handlers::bus;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bus::list_buses).post(bus::create_bus))
        .route(
            "/{id}",
            get(bus::get_bus).put(bus::update_bus).delete(bus::delete_bus),
        )
}
