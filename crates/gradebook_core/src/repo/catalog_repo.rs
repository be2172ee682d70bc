//! Student/course catalog repository.
//!
//! # Responsibility
//! - Persist and read back students and courses.
//! - Provide name-ordered listings for exploration.
//!
//! # Invariants
//! - Listings are ordered by `name ASC, uuid ASC`.

use crate::model::academic::{Course, CourseId, Student, StudentId};
use crate::repo::{parse_uuid, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for student and course records.
pub trait CatalogRepository {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId>;
    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>>;
    fn list_students(&self) -> RepoResult<Vec<Student>>;
    fn create_course(&self, course: &Course) -> RepoResult<CourseId>;
    fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>>;
    fn list_courses(&self) -> RepoResult<Vec<Course>>;
}

/// SQLite-backed catalog repository.
pub struct SqliteCatalogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCatalogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl CatalogRepository for SqliteCatalogRepository<'_> {
    fn create_student(&self, student: &Student) -> RepoResult<StudentId> {
        self.conn.execute(
            "INSERT INTO students (uuid, name) VALUES (?1, ?2);",
            params![student.id.to_string(), student.name.as_str()],
        )?;
        Ok(student.id)
    }

    fn get_student(&self, id: StudentId) -> RepoResult<Option<Student>> {
        let row = self
            .conn
            .query_row(
                "SELECT uuid, name FROM students WHERE uuid = ?1;",
                [id.to_string()],
                read_named_row,
            )
            .optional()?;

        row.map(student_from_row).transpose()
    }

    fn list_students(&self) -> RepoResult<Vec<Student>> {
        list_named(self.conn, "students")?
            .into_iter()
            .map(student_from_row)
            .collect()
    }

    fn create_course(&self, course: &Course) -> RepoResult<CourseId> {
        self.conn.execute(
            "INSERT INTO courses (uuid, name) VALUES (?1, ?2);",
            params![course.id.to_string(), course.name.as_str()],
        )?;
        Ok(course.id)
    }

    fn get_course(&self, id: CourseId) -> RepoResult<Option<Course>> {
        let row = self
            .conn
            .query_row(
                "SELECT uuid, name FROM courses WHERE uuid = ?1;",
                [id.to_string()],
                read_named_row,
            )
            .optional()?;

        row.map(course_from_row).transpose()
    }

    fn list_courses(&self) -> RepoResult<Vec<Course>> {
        list_named(self.conn, "courses")?
            .into_iter()
            .map(course_from_row)
            .collect()
    }
}

fn student_from_row((uuid, name): (String, String)) -> RepoResult<Student> {
    Ok(Student {
        id: parse_uuid(&uuid, "students.uuid")?,
        name,
    })
}

fn course_from_row((uuid, name): (String, String)) -> RepoResult<Course> {
    Ok(Course {
        id: parse_uuid(&uuid, "courses.uuid")?,
        name,
    })
}

fn read_named_row(row: &Row<'_>) -> rusqlite::Result<(String, String)> {
    Ok((row.get("uuid")?, row.get("name")?))
}

// `table` is always one of the two catalog table literals above.
fn list_named(conn: &Connection, table: &'static str) -> RepoResult<Vec<(String, String)>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT uuid, name FROM {table} ORDER BY name ASC, uuid ASC;"
    ))?;
    let rows = stmt
        .query_map([], read_named_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}
