use gradebook_core::db::migrations::latest_version;
use gradebook_core::db::{open_db, open_db_in_memory, DbError};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["students", "courses", "enrollments", "grades"] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gradebook.db");

    let conn_first = open_db(&path).unwrap();
    insert_student(&conn_first, "Ana");
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn schema_enforces_unique_enrollment_and_grade_bounds() {
    let conn = open_db_in_memory().unwrap();
    let student = insert_student(&conn, "Ana");
    let course = insert_course(&conn, "Physics");
    let enrollment = insert_enrollment(&conn, &student, &course).unwrap();

    assert!(insert_enrollment(&conn, &student, &course).is_err());

    for bad_value in [-1, 101] {
        let result = conn.execute(
            "INSERT INTO grades (uuid, enrollment_uuid, numeric_value) VALUES (?1, ?2, ?3);",
            rusqlite::params![Uuid::new_v4().to_string(), enrollment, bad_value],
        );
        assert!(result.is_err(), "value {bad_value} must be rejected");
    }
}

#[test]
fn grades_are_append_only_but_cascade_with_their_student() {
    let conn = open_db_in_memory().unwrap();
    let student = insert_student(&conn, "Ana");
    let course = insert_course(&conn, "Physics");
    let enrollment = insert_enrollment(&conn, &student, &course).unwrap();
    conn.execute(
        "INSERT INTO grades (uuid, enrollment_uuid, numeric_value) VALUES (?1, ?2, 80);",
        [Uuid::new_v4().to_string(), enrollment],
    )
    .unwrap();

    let update = conn.execute("UPDATE grades SET numeric_value = 100;", []);
    assert!(update.is_err());

    conn.execute("DELETE FROM students WHERE uuid = ?1;", [student.as_str()])
        .unwrap();
    for table in ["enrollments", "grades"] {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0, "{table} should cascade");
    }
}

#[test]
fn enrollments_reject_updates() {
    let conn = open_db_in_memory().unwrap();
    let student = insert_student(&conn, "Ana");
    let physics = insert_course(&conn, "Physics");
    let chemistry = insert_course(&conn, "Chemistry");
    let enrollment = insert_enrollment(&conn, &student, &physics).unwrap();

    let update = conn.execute(
        "UPDATE enrollments SET course_uuid = ?1 WHERE uuid = ?2;",
        [chemistry.as_str(), enrollment.as_str()],
    );
    assert!(update.is_err());

    let course: String = conn
        .query_row(
            "SELECT course_uuid FROM enrollments WHERE uuid = ?1;",
            [enrollment.as_str()],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(course, physics);
}

#[test]
fn deleting_a_course_cascades_to_enrollments_and_grades() {
    let conn = open_db_in_memory().unwrap();
    let student = insert_student(&conn, "Ana");
    let course = insert_course(&conn, "Physics");
    let enrollment = insert_enrollment(&conn, &student, &course).unwrap();
    conn.execute(
        "INSERT INTO grades (uuid, enrollment_uuid, numeric_value) VALUES (?1, ?2, 91);",
        [Uuid::new_v4().to_string(), enrollment],
    )
    .unwrap();

    conn.execute("DELETE FROM courses WHERE uuid = ?1;", [course.as_str()])
        .unwrap();
    for table in ["enrollments", "grades"] {
        assert_eq!(row_count(&conn, table), 0, "{table} should cascade");
    }
    assert_eq!(row_count(&conn, "students"), 1);
}

#[test]
fn grades_require_an_existing_enrollment() {
    let conn = open_db_in_memory().unwrap();
    let result = conn.execute(
        "INSERT INTO grades (uuid, enrollment_uuid, numeric_value) VALUES (?1, ?2, 80);",
        [Uuid::new_v4().to_string(), Uuid::new_v4().to_string()],
    );
    assert!(result.is_err());
}

fn insert_student(conn: &Connection, name: &str) -> String {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO students (uuid, name) VALUES (?1, ?2);",
        [id.as_str(), name],
    )
    .unwrap();
    id
}

fn insert_course(conn: &Connection, name: &str) -> String {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO courses (uuid, name) VALUES (?1, ?2);",
        [id.as_str(), name],
    )
    .unwrap();
    id
}

fn insert_enrollment(conn: &Connection, student: &str, course: &str) -> rusqlite::Result<String> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO enrollments (uuid, student_uuid, course_uuid) VALUES (?1, ?2, ?3);",
        [id.as_str(), student, course],
    )?;
    Ok(id)
}

fn row_count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| row.get(0))
        .unwrap()
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
