use axum::routing::get;
use axum::Router;

use crate::handlers::driver;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(driver::list_drivers).post(driver::create_driver))
        .route(
            "/{id}",
            get(driver::get_driver)
                .put(driver::update_driver)
                .delete(driver::delete_driver),
        )
}
