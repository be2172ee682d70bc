use gradebook_core::db::open_db_in_memory;
use gradebook_core::{
    Course, EnrollmentError, EnrollmentRepository, EnrollmentService, RegistrationService,
    SqliteCatalogRepository, SqliteEnrollmentRepository, Student,
};
use rusqlite::Connection;
use uuid::Uuid;

fn enrollment_service(
    conn: &Connection,
) -> EnrollmentService<SqliteCatalogRepository<'_>, SqliteEnrollmentRepository<'_>> {
    EnrollmentService::new(
        SqliteCatalogRepository::new(conn),
        SqliteEnrollmentRepository::new(conn),
    )
}

fn student(conn: &Connection, name: &str) -> Student {
    RegistrationService::new(SqliteCatalogRepository::new(conn))
        .create_student(name)
        .unwrap()
}

fn course(conn: &Connection, name: &str) -> Course {
    RegistrationService::new(SqliteCatalogRepository::new(conn))
        .create_course(name)
        .unwrap()
}

#[test]
fn enroll_student_creates_enrollment() {
    let conn = open_db_in_memory().unwrap();
    let ana = student(&conn, "Ana");
    let physics = course(&conn, "Physics");

    let enrollment = enrollment_service(&conn)
        .enroll_student(ana.id, physics.id)
        .unwrap();
    assert_eq!(enrollment.student_id, ana.id);
    assert_eq!(enrollment.course_id, physics.id);

    let stored = SqliteEnrollmentRepository::new(&conn)
        .find_enrollment(ana.id, physics.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored, enrollment);
}

#[test]
fn duplicate_enrollment_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let ana = student(&conn, "Ana");
    let physics = course(&conn, "Physics");
    let service = enrollment_service(&conn);

    service.enroll_student(ana.id, physics.id).unwrap();
    let err = service.enroll_student(ana.id, physics.id).unwrap_err();
    assert!(matches!(
        err,
        EnrollmentError::DuplicateEnrollment { student_id, course_id }
            if student_id == ana.id && course_id == physics.id
    ));
}

#[test]
fn repository_surfaces_unique_violation_as_conflict() {
    let conn = open_db_in_memory().unwrap();
    let ana = student(&conn, "Ana");
    let physics = course(&conn, "Physics");
    let repo = SqliteEnrollmentRepository::new(&conn);

    repo.create_enrollment(&gradebook_core::Enrollment::new(ana.id, physics.id))
        .unwrap();
    let err = repo
        .create_enrollment(&gradebook_core::Enrollment::new(ana.id, physics.id))
        .unwrap_err();
    assert!(matches!(err, gradebook_core::RepoError::Conflict(_)));
}

#[test]
fn enrolling_unknown_student_or_course_fails() {
    let conn = open_db_in_memory().unwrap();
    let ana = student(&conn, "Ana");
    let physics = course(&conn, "Physics");
    let service = enrollment_service(&conn);

    let missing = Uuid::new_v4();
    assert!(matches!(
        service.enroll_student(missing, physics.id),
        Err(EnrollmentError::StudentNotFound(id)) if id == missing
    ));
    assert!(matches!(
        service.enroll_student(ana.id, missing),
        Err(EnrollmentError::CourseNotFound(id)) if id == missing
    ));
}

#[test]
fn list_courses_for_student_returns_enrolled_courses_by_name() {
    let conn = open_db_in_memory().unwrap();
    let ana = student(&conn, "Ana");
    let algebra = course(&conn, "Algebra");
    let biology = course(&conn, "Biology");
    course(&conn, "Chemistry");
    let service = enrollment_service(&conn);

    service.enroll_student(ana.id, biology.id).unwrap();
    service.enroll_student(ana.id, algebra.id).unwrap();

    let courses = service.list_courses_for_student(ana.id).unwrap();
    let names: Vec<&str> = courses.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Algebra", "Biology"]);
}

#[test]
fn list_students_for_course_returns_enrolled_students_by_name() {
    let conn = open_db_in_memory().unwrap();
    let physics = course(&conn, "Physics");
    let ana = student(&conn, "Ana");
    let bruno = student(&conn, "Bruno");
    student(&conn, "Carla");
    let service = enrollment_service(&conn);

    service.enroll_student(bruno.id, physics.id).unwrap();
    service.enroll_student(ana.id, physics.id).unwrap();

    let students = service.list_students_for_course(physics.id).unwrap();
    let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Bruno"]);
}
