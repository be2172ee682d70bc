//! Grade history repository.
//!
//! # Responsibility
//! - Append grade entries for an enrollment.
//! - Read grade history in creation order.
//!
//! # Invariants
//! - There is no update path; the schema also rejects `UPDATE` on grades.
//! - History order is `created_at ASC, rowid ASC`. `created_at` is epoch
//!   seconds scaled to milliseconds, so entries written within the same
//!   second keep insertion order.

use crate::model::academic::{EnrollmentId, Grade};
use crate::model::grade_scale::checked_numeric;
use crate::repo::{parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Repository interface for append-only grade history.
pub trait GradeRepository {
    /// Appends one grade and returns the stored record.
    fn append_grade(&self, enrollment_id: EnrollmentId, numeric_value: u8) -> RepoResult<Grade>;
    fn list_grades(&self, enrollment_id: EnrollmentId) -> RepoResult<Vec<Grade>>;
}

/// SQLite-backed grade repository.
pub struct SqliteGradeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteGradeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl GradeRepository for SqliteGradeRepository<'_> {
    fn append_grade(&self, enrollment_id: EnrollmentId, numeric_value: u8) -> RepoResult<Grade> {
        let id = Uuid::new_v4();
        let created_at: i64 = self.conn.query_row(
            "INSERT INTO grades (uuid, enrollment_uuid, numeric_value)
             VALUES (?1, ?2, ?3)
             RETURNING created_at;",
            params![id.to_string(), enrollment_id.to_string(), numeric_value],
            |row| row.get(0),
        )?;

        Ok(Grade {
            id,
            enrollment_id,
            numeric_value,
            created_at,
        })
    }

    fn list_grades(&self, enrollment_id: EnrollmentId) -> RepoResult<Vec<Grade>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, numeric_value, created_at
             FROM grades
             WHERE enrollment_uuid = ?1
             ORDER BY created_at ASC, rowid ASC;",
        )?;

        let mut rows = stmt.query([enrollment_id.to_string()])?;
        let mut grades = Vec::new();
        while let Some(row) = rows.next()? {
            let uuid_text: String = row.get("uuid")?;
            let raw_value: i64 = row.get("numeric_value")?;
            let numeric_value = checked_numeric(raw_value).map_err(|_| {
                RepoError::InvalidData(format!(
                    "invalid numeric value `{raw_value}` in grades.numeric_value"
                ))
            })?;
            grades.push(Grade {
                id: parse_uuid(&uuid_text, "grades.uuid")?,
                enrollment_id,
                numeric_value,
                created_at: row.get("created_at")?,
            });
        }

        Ok(grades)
    }
}
