//! Repository layer: one unit struct per table, plain `sqlx` queries.
//!
//! Repositories return `sqlx::Error` untouched; classification into
//! HTTP statuses happens at the API boundary.

pub mod booking_repo;
pub mod bus_repo;
pub mod driver_repo;
pub mod feedback_repo;
pub mod payment_repo;
pub mod province_repo;
pub mod role_repo;
pub mod route_repo;
pub mod schedule_pattern_repo;
pub mod schedule_repo;
pub mod session_repo;
pub mod stop_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use bus_repo::BusRepo;
pub use driver_repo::DriverRepo;
pub use feedback_repo::FeedbackRepo;
pub use payment_repo::PaymentRepo;
pub use province_repo::ProvinceRepo;
pub use role_repo::RoleRepo;
pub use route_repo::RouteRepo;
pub use schedule_pattern_repo::SchedulePatternRepo;
pub use schedule_repo::ScheduleRepo;
pub use session_repo::SessionRepo;
pub use stop_repo::StopRepo;
pub use user_repo::UserRepo;
