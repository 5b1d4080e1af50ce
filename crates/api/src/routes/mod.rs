//! Route registration, one module per resource.
//!
//! Everything below is mounted under `/api/v1`:
//!
//! | Prefix               | Access                       |
//! |----------------------|------------------------------|
//! | `/auth`              | public + authenticated       |
//! | `/admin/users`       | admin                        |
//! | `/provinces`         | public read, staff write     |
//! | `/routes` (+ stops)  | public read, staff write     |
//! | `/buses`             | public read, staff write     |
//! | `/drivers`           | staff                        |
//! | `/schedule-patterns` | staff                        |
//! | `/schedules`         | public read, staff write     |
//! | `/bookings`          | authenticated                |
//! | `/payments`          | staff                        |
//! | `/feedback`          | public read, auth write      |

use axum::Router;

use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod booking;
pub mod bus;
pub mod driver;
pub mod feedback;
pub mod health;
pub mod payment;
pub mod province;
pub mod route;
pub mod schedule;
pub mod schedule_pattern;

/// All `/api/v1` routes merged into one router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/admin/users", admin::router())
        .nest("/provinces", province::router())
        .nest("/routes", route::router())
        .nest("/buses", bus::router())
        .nest("/drivers", driver::router())
        .nest("/schedule-patterns", schedule_pattern::router())
        .nest("/schedules", schedule::router())
        .nest("/bookings", booking::router())
        .nest("/payments", payment::router())
        .nest("/feedback", feedback::router())
}
