//! Report card assembly.
//!
//! # Invariants
//! - One `CourseReport` per enrollment, ordered by course name.
//! - A course without grades reports average `0` / letter `F` instead of
//!   failing, so a report card is always total.

use crate::model::academic::{CourseId, StudentId};
use crate::model::grade_scale::{numeric_to_letter, rounded_mean, LetterGrade};
use crate::repo::enrollment_repo::EnrollmentRepository;
use crate::repo::grade_repo::GradeRepository;
use crate::repo::{RepoError, RepoResult};
use log::info;
use serde::Serialize;

/// Consolidated view of a student's performance in one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseReport {
    pub course_id: CourseId,
    pub course_name: String,
    /// Full history in creation order.
    pub numeric_grades: Vec<u8>,
    pub numeric_average: u8,
    pub letter_average: LetterGrade,
}

/// Report card across all courses a student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentReportCard {
    pub student_id: StudentId,
    pub courses: Vec<CourseReport>,
}

pub struct ReportCardService<E: EnrollmentRepository, G: GradeRepository> {
    enrollments: E,
    grades: G,
}

impl<E: EnrollmentRepository, G: GradeRepository> ReportCardService<E, G> {
    pub fn new(enrollments: E, grades: G) -> Self {
        Self {
            enrollments,
            grades,
        }
    }

    /// Builds the report card for a student.
    ///
    /// An unknown student, like one without enrollments, yields an empty
    /// course list.
    pub fn build_report_card(&self, student_id: StudentId) -> RepoResult<StudentReportCard> {
        let mut courses = Vec::new();
        for enrolled in self.enrollments.list_enrolled_courses(student_id)? {
            let numeric_grades: Vec<u8> = self
                .grades
                .list_grades(enrolled.enrollment_id)?
                .into_iter()
                .map(|grade| grade.numeric_value)
                .collect();
            let numeric_average = rounded_mean(&numeric_grades).unwrap_or(0);
            let letter_average = numeric_to_letter(i64::from(numeric_average))
                .map_err(|err| RepoError::InvalidData(err.to_string()))?;

            courses.push(CourseReport {
                course_id: enrolled.course.id,
                course_name: enrolled.course.name,
                numeric_grades,
                numeric_average,
                letter_average,
            });
        }

        info!(
            "event=report_card_build module=service status=ok student_id={student_id} course_count={}",
            courses.len()
        );
        Ok(StudentReportCard {
            student_id,
            courses,
        })
    }
}
