//! Domain model for academic records.
//!
//! # Responsibility
//! - Define the records persisted by core (students, courses, enrollments,
//!   grades).
//! - Own the fixed letter/numeric grade scale and averaging arithmetic.
//!
//! # Invariants
//! - Every record is identified by a stable UUID.
//! - The numeric value is the only persisted form of a grade; letters are
//!   always derived.

pub mod academic;
pub mod grade_scale;
