//! Request handlers, one module per resource.

pub mod admin;
pub mod auth;
pub mod booking;
pub mod bus;
pub mod driver;
pub mod feedback;
pub mod payment;
pub mod province;
pub mod route;
pub mod schedule;
pub mod schedule_pattern;
pub mod stop;
