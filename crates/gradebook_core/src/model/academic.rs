//! Student, course, enrollment and grade records.
//!
//! # Invariants
//! - Names are stored trimmed and non-blank.
//! - A `Grade` always references an existing `Enrollment`.
//! - `Grade::numeric_value` is within `0..=100`.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type StudentId = Uuid;
pub type CourseId = Uuid;
pub type EnrollmentId = Uuid;
pub type GradeId = Uuid;

/// Maximum accepted length (in characters) for student and course names.
pub const MAX_NAME_CHARS: usize = 255;

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
}

impl Student {
    /// Creates a student with a freshly generated id.
    ///
    /// The name is taken as-is; callers normalize it first.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// A course students can enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
}

impl Course {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

/// Participation of one student in one course.
///
/// At most one enrollment exists per `(student_id, course_id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub course_id: CourseId,
}

impl Enrollment {
    pub fn new(student_id: StudentId, course_id: CourseId) -> Self {
        Self {
            id: Uuid::new_v4(),
            student_id,
            course_id,
        }
    }
}

/// One historical grade entry.
///
/// Multiple grades may exist per enrollment. They are ordered by
/// `created_at` and then by insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub id: GradeId,
    pub enrollment_id: EnrollmentId,
    pub numeric_value: u8,
    /// Unix epoch seconds scaled to milliseconds, assigned by storage.
    pub created_at: i64,
}

/// Enrollment joined with its course, as listed for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    pub enrollment_id: EnrollmentId,
    pub course: Course,
}

/// Normalizes a student/course name.
///
/// Returns `None` when the trimmed name is blank or longer than
/// [`MAX_NAME_CHARS`].
pub fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_NAME_CHARS {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, MAX_NAME_CHARS};

    #[test]
    fn normalize_name_trims_surrounding_whitespace() {
        assert_eq!(normalize_name("  Alice  ").as_deref(), Some("Alice"));
    }

    #[test]
    fn normalize_name_rejects_blank_and_overlong() {
        assert_eq!(normalize_name(""), None);
        assert_eq!(normalize_name(" \t\n "), None);
        assert_eq!(normalize_name(&"x".repeat(MAX_NAME_CHARS + 1)), None);
        assert!(normalize_name(&"x".repeat(MAX_NAME_CHARS)).is_some());
    }
}
