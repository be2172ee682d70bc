use gradebook_core::db::open_db_in_memory;
use gradebook_core::{
    CatalogRepository, RegistrationError, RegistrationService, SqliteCatalogRepository,
};
use uuid::Uuid;

#[test]
fn create_student_strips_name_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let service = RegistrationService::new(SqliteCatalogRepository::new(&conn));

    let student = service.create_student("  Alice  ").unwrap();
    assert_eq!(student.name, "Alice");

    let loaded = service.get_student(student.id).unwrap().unwrap();
    assert_eq!(loaded, student);
}

#[test]
fn create_student_rejects_blank_name() {
    let conn = open_db_in_memory().unwrap();
    let service = RegistrationService::new(SqliteCatalogRepository::new(&conn));

    let err = service.create_student("   ").unwrap_err();
    assert!(matches!(err, RegistrationError::InvalidStudentName(name) if name == "   "));
    assert!(service.list_students().unwrap().is_empty());
}

#[test]
fn create_course_strips_name_and_rejects_blank_or_overlong() {
    let conn = open_db_in_memory().unwrap();
    let service = RegistrationService::new(SqliteCatalogRepository::new(&conn));

    let course = service.create_course("  Physics  ").unwrap();
    assert_eq!(course.name, "Physics");

    assert!(matches!(
        service.create_course(""),
        Err(RegistrationError::InvalidCourseName(_))
    ));
    assert!(matches!(
        service.create_course(&"x".repeat(256)),
        Err(RegistrationError::InvalidCourseName(_))
    ));
}

#[test]
fn listings_are_ordered_by_name() {
    let conn = open_db_in_memory().unwrap();
    let service = RegistrationService::new(SqliteCatalogRepository::new(&conn));

    for name in ["Bruno", "Ana", "Carla"] {
        service.create_student(name).unwrap();
    }
    for name in ["Math", "History"] {
        service.create_course(name).unwrap();
    }

    let students: Vec<String> = service
        .list_students()
        .unwrap()
        .into_iter()
        .map(|student| student.name)
        .collect();
    assert_eq!(students, ["Ana", "Bruno", "Carla"]);

    let courses: Vec<String> = service
        .list_courses()
        .unwrap()
        .into_iter()
        .map(|course| course.name)
        .collect();
    assert_eq!(courses, ["History", "Math"]);
}

#[test]
fn unknown_ids_read_back_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteCatalogRepository::new(&conn);

    assert!(repo.get_student(Uuid::new_v4()).unwrap().is_none());
    assert!(repo.get_course(Uuid::new_v4()).unwrap().is_none());
}
