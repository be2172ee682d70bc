//! Core use-case services.
//!
//! # Responsibility
//! - Enforce business rules above the repository layer.
//! - Expose explicit domain error kinds to callers; nothing is swallowed.
//!
//! The pipeline is registration -> enrollment -> grade recording ->
//! aggregation -> report assembly.

pub mod enrollment_service;
pub mod grade_service;
pub mod registration_service;
pub mod report_card_service;
