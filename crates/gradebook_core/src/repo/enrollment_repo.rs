//! Enrollment repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist (student, course) enrollments.
//! - Answer roster queries in both directions.
//!
//! # Invariants
//! - Uniqueness of `(student_uuid, course_uuid)` is enforced by the schema;
//!   duplicate inserts surface as `RepoError::Conflict`.
//! - Inserts referencing unknown students/courses surface as
//!   `RepoError::MissingReference`.

use crate::model::academic::{
    Course, CourseId, EnrolledCourse, Enrollment, EnrollmentId, Student, StudentId,
};
use crate::repo::{parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for enrollments.
pub trait EnrollmentRepository {
    fn create_enrollment(&self, enrollment: &Enrollment) -> RepoResult<EnrollmentId>;
    fn find_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> RepoResult<Option<Enrollment>>;
    /// Enrollments of one student joined with their courses, by course name.
    fn list_enrolled_courses(&self, student_id: StudentId) -> RepoResult<Vec<EnrolledCourse>>;
    /// Students enrolled in one course, by student name.
    fn list_enrolled_students(&self, course_id: CourseId) -> RepoResult<Vec<Student>>;
}

/// SQLite-backed enrollment repository.
pub struct SqliteEnrollmentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEnrollmentRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EnrollmentRepository for SqliteEnrollmentRepository<'_> {
    fn create_enrollment(&self, enrollment: &Enrollment) -> RepoResult<EnrollmentId> {
        self.conn.execute(
            "INSERT INTO enrollments (uuid, student_uuid, course_uuid) VALUES (?1, ?2, ?3);",
            params![
                enrollment.id.to_string(),
                enrollment.student_id.to_string(),
                enrollment.course_id.to_string(),
            ],
        )?;
        Ok(enrollment.id)
    }

    fn find_enrollment(
        &self,
        student_id: StudentId,
        course_id: CourseId,
    ) -> RepoResult<Option<Enrollment>> {
        let uuid_text = self
            .conn
            .query_row(
                "SELECT uuid
                 FROM enrollments
                 WHERE student_uuid = ?1
                   AND course_uuid = ?2;",
                params![student_id.to_string(), course_id.to_string()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match uuid_text {
            Some(value) => Ok(Some(Enrollment {
                id: parse_uuid(&value, "enrollments.uuid")?,
                student_id,
                course_id,
            })),
            None => Ok(None),
        }
    }

    fn list_enrolled_courses(&self, student_id: StudentId) -> RepoResult<Vec<EnrolledCourse>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                e.uuid AS enrollment_uuid,
                c.uuid AS course_uuid,
                c.name AS course_name
             FROM enrollments e
             INNER JOIN courses c ON c.uuid = e.course_uuid
             WHERE e.student_uuid = ?1
             ORDER BY c.name ASC, c.uuid ASC;",
        )?;

        let mut rows = stmt.query([student_id.to_string()])?;
        let mut enrolled = Vec::new();
        while let Some(row) = rows.next()? {
            let enrollment_uuid: String = row.get("enrollment_uuid")?;
            let course_uuid: String = row.get("course_uuid")?;
            enrolled.push(EnrolledCourse {
                enrollment_id: parse_uuid(&enrollment_uuid, "enrollments.uuid")?,
                course: Course {
                    id: parse_uuid(&course_uuid, "courses.uuid")?,
                    name: row.get("course_name")?,
                },
            });
        }

        Ok(enrolled)
    }

    fn list_enrolled_students(&self, course_id: CourseId) -> RepoResult<Vec<Student>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.uuid AS uuid, s.name AS name
             FROM enrollments e
             INNER JOIN students s ON s.uuid = e.student_uuid
             WHERE e.course_uuid = ?1
             ORDER BY s.name ASC, s.uuid ASC;",
        )?;

        let mut rows = stmt.query([course_id.to_string()])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            students.push(Student {
                id: parse_uuid(&uuid_text, "students.uuid")?,
                name: row.get("name")?,
            });
        }

        Ok(students)
    }
}
