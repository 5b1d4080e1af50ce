use axum::routing::get;
use axum::Router;

use crate::handlers::province;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(province::list_provinces).post(province::create_province),
        )
        .route(
            "/{id}",
            get(province::get_province)
                .put(province::update_province)
                .delete(province::delete_province),
        )
}
