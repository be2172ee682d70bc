//! Enrollment use-cases and roster queries.
//!
//! # Invariants
//! - A student is enrolled in a course at most once. The schema's unique
//!   constraint is the source of truth; a lost insert race still surfaces
//!   as `DuplicateEnrollment`.
//! - Both the student and the course must exist before an enrollment is
//!   written.

use crate::model::academic::{Course, CourseId, Enrollment, Student, StudentId};
use crate::repo::catalog_repo::CatalogRepository;
use crate::repo::enrollment_repo::EnrollmentRepository;
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from enrollment use-cases.
#[derive(Debug)]
pub enum EnrollmentError {
    DuplicateEnrollment {
        student_id: StudentId,
        course_id: CourseId,
    },
    StudentNotFound(StudentId),
    CourseNotFound(CourseId),
    Repo(RepoError),
}

impl Display for EnrollmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEnrollment {
                student_id,
                course_id,
            } => write!(
                f,
                "student {student_id} is already enrolled in course {course_id}"
            ),
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EnrollmentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for EnrollmentError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Enrollment facade over catalog and enrollment repositories.
pub struct EnrollmentService<C: CatalogRepository, E: EnrollmentRepository> {
    catalog: C,
    enrollments: E,
}

impl<C: CatalogRepository, E: EnrollmentRepository> EnrollmentService<C, E> {
    pub fn new(catalog: C, enrollments: E) -> Self {
        Self {
            catalog,
            enrollments,
        }
    }

    /// Enrolls a student into a course.
    ///
    /// # Errors
    /// - `StudentNotFound` / `CourseNotFound` when either side is unknown.
    /// - `DuplicateEnrollment` when the pair is already enrolled.
    /// - `Repo(MissingReference)` when the insert fails a foreign-key check
    ///   that a re-check of both sides cannot attribute.
    pub fn enroll_student(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Enrollment, EnrollmentError> {
        self.ensure_references(student_id, course_id)?;

        let enrollment = Enrollment::new(student_id, course_id);
        match self.enrollments.create_enrollment(&enrollment) {
            Ok(_) => {
                info!(
                    "event=enroll module=service status=ok enrollment_id={} student_id={student_id} course_id={course_id}",
                    enrollment.id
                );
                Ok(enrollment)
            }
            Err(RepoError::Conflict(_)) => {
                warn!(
                    "event=enroll module=service status=rejected error_code=duplicate_enrollment student_id={student_id} course_id={course_id}"
                );
                Err(EnrollmentError::DuplicateEnrollment {
                    student_id,
                    course_id,
                })
            }
            Err(RepoError::MissingReference(details)) => {
                // Referenced row vanished between the check and the insert.
                self.ensure_references(student_id, course_id)?;
                Err(RepoError::MissingReference(details).into())
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Returns all courses a student is enrolled in, ordered by name.
    pub fn list_courses_for_student(&self, student_id: StudentId) -> RepoResult<Vec<Course>> {
        Ok(self
            .enrollments
            .list_enrolled_courses(student_id)?
            .into_iter()
            .map(|enrolled| enrolled.course)
            .collect())
    }

    /// Returns all students enrolled in a course, ordered by name.
    pub fn list_students_for_course(&self, course_id: CourseId) -> RepoResult<Vec<Student>> {
        self.enrollments.list_enrolled_students(course_id)
    }

    fn ensure_references(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<(), EnrollmentError> {
        if self.catalog.get_student(student_id)?.is_none() {
            return Err(EnrollmentError::StudentNotFound(student_id));
        }
        if self.catalog.get_course(course_id)?.is_none() {
            return Err(EnrollmentError::CourseNotFound(course_id));
        }
        Ok(())
    }
}
