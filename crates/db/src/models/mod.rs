//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod booking;
pub mod bus;
pub mod driver;
pub mod feedback;
pub mod payment;
pub mod province;
pub mod role;
pub mod route;
pub mod schedule;
pub mod schedule_pattern;
pub mod session;
pub mod status;
pub mod stop;
pub mod user;
