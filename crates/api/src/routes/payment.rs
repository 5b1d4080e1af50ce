use axum::routing::post;
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/confirm", post(payment::confirm_payment))
        .route("/{id}/fail", post(payment::fail_payment))
}
