//! Shared domain logic for the vexe bus-ticket reservation platform.
//!
//! This crate has zero internal dependencies so the HTTP layer, background
//! jobs, and any future CLI tooling share one definition of the domain
//! rules: the UTC/Vietnam-local time boundary, booking and schedule state
//! machines, seat-map generation, and input validation helpers.

pub mod booking;
pub mod error;
pub mod localtime;
pub mod pagination;
pub mod recurrence;
pub mod roles;
pub mod schedule;
pub mod seating;
pub mod types;
pub mod validation;
