use axum::routing::{get, post};
use axum::Router;

use crate::handlers::booking;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(booking::list_bookings).post(booking::create_booking))
        .route("/{id}", get(booking::get_booking))
        .route("/{id}/cancel", post(booking::cancel_booking))
        .route(
            "/{id}/payments",
            get(booking::list_payments).post(booking::create_payment),
        )
}
