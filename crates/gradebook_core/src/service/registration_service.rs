//! Student and course registration.
//!
//! # Invariants
//! - Names are trimmed before persistence; blank or overlong names are
//!   rejected before any SQL runs.

use crate::model::academic::{normalize_name, Course, CourseId, Student, StudentId};
use crate::repo::catalog_repo::CatalogRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from registration use-cases.
#[derive(Debug)]
pub enum RegistrationError {
    /// Raw rejected input is kept for the caller.
    InvalidStudentName(String),
    InvalidCourseName(String),
    Repo(RepoError),
}

impl Display for RegistrationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStudentName(name) => write!(f, "invalid student name: {name:?}"),
            Self::InvalidCourseName(name) => write!(f, "invalid course name: {name:?}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistrationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for RegistrationError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Registration facade over a catalog repository.
pub struct RegistrationService<R: CatalogRepository> {
    repo: R,
}

impl<R: CatalogRepository> RegistrationService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a student from a raw name.
    pub fn create_student(&self, name: &str) -> Result<Student, RegistrationError> {
        let normalized = normalize_name(name)
            .ok_or_else(|| RegistrationError::InvalidStudentName(name.to_string()))?;
        let student = Student::new(normalized);
        self.repo.create_student(&student)?;
        info!(
            "event=student_create module=service status=ok student_id={}",
            student.id
        );
        Ok(student)
    }

    /// Creates a course from a raw name.
    pub fn create_course(&self, name: &str) -> Result<Course, RegistrationError> {
        let normalized = normalize_name(name)
            .ok_or_else(|| RegistrationError::InvalidCourseName(name.to_string()))?;
        let course = Course::new(normalized);
        self.repo.create_course(&course)?;
        info!(
            "event=course_create module=service status=ok course_id={}",
            course.id
        );
        Ok(course)
    }

    pub fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        self.repo.get_student(id)
    }

    pub fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        self.repo.get_course(id)
    }

    /// Lists all students ordered by name.
    pub fn list_students(&self) -> RepoResult<Vec<Student>> {
        self.repo.list_students()
    }

    /// Lists all courses ordered by name.
    pub fn list_courses(&self) -> RepoResult<Vec<Course>> {
        self.repo.list_courses()
    }
}
