//! Core domain logic for the gradebook.
//! This crate is the single source of truth for academic record rules:
//! the grade scale, grade validation, averaging and report cards.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, GradebookConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::academic::{
    Course, CourseId, EnrolledCourse, Enrollment, EnrollmentId, Grade, GradeId, Student,
    StudentId,
};
pub use model::grade_scale::{
    letter_to_numeric_max, numeric_to_letter, rounded_mean, GradeScaleError, LetterBand,
    LetterGrade, GRADE_SCALE,
};
pub use repo::catalog_repo::{CatalogRepository, SqliteCatalogRepository};
pub use repo::enrollment_repo::{EnrollmentRepository, SqliteEnrollmentRepository};
pub use repo::grade_repo::{GradeRepository, SqliteGradeRepository};
pub use repo::{RepoError, RepoResult};
pub use service::enrollment_service::{EnrollmentError, EnrollmentService};
pub use service::grade_service::{GradeError, GradeInput, GradeService};
pub use service::registration_service::{RegistrationError, RegistrationService};
pub use service::report_card_service::{CourseReport, ReportCardService, StudentReportCard};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
