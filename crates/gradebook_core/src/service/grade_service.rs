//! Grade recording and per-course aggregation.
//!
//! # Responsibility
//! - Validate grade input (exactly one of numeric/letter) and append it to
//!   an enrollment's history.
//! - Derive numeric and letter averages from recorded history.
//!
//! # Invariants
//! - Every operation requires an existing enrollment.
//! - Letter input is stored as the numeric max of its band.
//! - Recorded grades are never mutated.

use crate::model::academic::{CourseId, Enrollment, Grade, StudentId};
use crate::model::grade_scale::{
    checked_numeric, letter_to_numeric_max, numeric_to_letter, rounded_mean, LetterGrade,
};
use crate::repo::enrollment_repo::EnrollmentRepository;
use crate::repo::grade_repo::GradeRepository;
use crate::repo::RepoError;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from grade use-cases.
#[derive(Debug)]
pub enum GradeError {
    StudentNotEnrolled {
        student_id: StudentId,
        course_id: CourseId,
    },
    /// Both/neither of numeric and letter given, or numeric out of range.
    InvalidGradeInput(String),
    InvalidLetterGrade(String),
    NoGradesRecorded {
        student_id: StudentId,
        course_id: CourseId,
    },
    Repo(RepoError),
}

impl Display for GradeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotEnrolled {
                student_id,
                course_id,
            } => write!(f, "student {student_id} is not enrolled in course {course_id}"),
            Self::InvalidGradeInput(message) => write!(f, "invalid grade input: {message}"),
            Self::InvalidLetterGrade(letter) => write!(f, "invalid letter grade: `{letter}`"),
            Self::NoGradesRecorded {
                student_id,
                course_id,
            } => write!(
                f,
                "no grades recorded for student {student_id} in course {course_id}"
            ),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GradeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for GradeError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Raw grade input as supplied by a caller.
///
/// Exactly one field must be set. A letter that is blank after trimming
/// counts as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeInput {
    pub numeric: Option<i64>,
    pub letter: Option<String>,
}

impl GradeInput {
    pub fn numeric(value: i64) -> Self {
        Self {
            numeric: Some(value),
            letter: None,
        }
    }

    pub fn letter(value: impl Into<String>) -> Self {
        Self {
            numeric: None,
            letter: Some(value.into()),
        }
    }

    /// Resolves the input to the numeric value that will be stored.
    pub fn resolve(&self) -> Result<u8, GradeError> {
        let letter = self
            .letter
            .as_deref()
            .filter(|value| !value.trim().is_empty());

        match (self.numeric, letter) {
            (Some(value), None) => checked_numeric(value).map_err(|_| {
                GradeError::InvalidGradeInput(
                    "numeric grade must be between 0 and 100 (inclusive)".to_string(),
                )
            }),
            (None, Some(letter)) => letter_to_numeric_max(letter)
                .map_err(|_| GradeError::InvalidLetterGrade(letter.to_string())),
            _ => Err(GradeError::InvalidGradeInput(
                "grade must be provided as exactly one of: numeric (0..100) or letter".to_string(),
            )),
        }
    }
}

/// Grade facade over enrollment and grade repositories.
pub struct GradeService<E: EnrollmentRepository, G: GradeRepository> {
    enrollments: E,
    grades: G,
}

impl<E: EnrollmentRepository, G: GradeRepository> GradeService<E, G> {
    pub fn new(enrollments: E, grades: G) -> Self {
        Self {
            enrollments,
            grades,
        }
    }

    /// Records one grade for an enrolled student.
    ///
    /// Enrollment is checked before the input, so an unenrolled student gets
    /// `StudentNotEnrolled` even when the input is also invalid.
    pub fn record_grade(
        &self,
        student_id: StudentId,
        course_id: CourseId,
        input: &GradeInput,
    ) -> Result<Grade, GradeError> {
        let enrollment = self.enrollment_or_err(student_id, course_id)?;
        let numeric_value = input.resolve()?;
        let grade = self.grades.append_grade(enrollment.id, numeric_value)?;
        info!(
            "event=grade_record module=service status=ok enrollment_id={} grade_id={} source={}",
            enrollment.id,
            grade.id,
            if input.numeric.is_some() { "numeric" } else { "letter" }
        );
        Ok(grade)
    }

    /// Returns the numeric grade history in creation order.
    pub fn get_numeric_grades(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Vec<u8>, GradeError> {
        let enrollment = self.enrollment_or_err(student_id, course_id)?;
        Ok(self
            .grades
            .list_grades(enrollment.id)?
            .into_iter()
            .map(|grade| grade.numeric_value)
            .collect())
    }

    /// Returns the grade history mapped to letters.
    pub fn get_letter_grades(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Vec<LetterGrade>, GradeError> {
        self.get_numeric_grades(student_id, course_id)?
            .into_iter()
            .map(letter_for)
            .collect()
    }

    /// Average of all recorded grades, rounded half-up.
    ///
    /// # Errors
    /// - `NoGradesRecorded` when the enrollment has no history yet.
    pub fn calculate_numeric_average(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<u8, GradeError> {
        let values = self.get_numeric_grades(student_id, course_id)?;
        let average = rounded_mean(&values).ok_or(GradeError::NoGradesRecorded {
            student_id,
            course_id,
        })?;
        debug!(
            "event=grade_average module=service status=ok student_id={student_id} course_id={course_id} count={} average={average}",
            values.len()
        );
        Ok(average)
    }

    pub fn calculate_letter_average(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<LetterGrade, GradeError> {
        let average = self.calculate_numeric_average(student_id, course_id)?;
        letter_for(average)
    }

    fn enrollment_or_err(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> Result<Enrollment, GradeError> {
        self.enrollments
            .find_enrollment(student_id, course_id)?
            .ok_or(GradeError::StudentNotEnrolled {
                student_id,
                course_id,
            })
    }
}

// Stored values are range-checked on read, so this only fails on a scale bug.
fn letter_for(value: u8) -> Result<LetterGrade, GradeError> {
    numeric_to_letter(i64::from(value)).map_err(|err| {
        GradeError::Repo(RepoError::InvalidData(format!(
            "grade value has no letter band: {err}"
        )))
    })
}
