//! `gradebook` command-line front end.
//!
//! Thin wrapper over `gradebook_core` services: parses arguments, resolves
//! configuration, opens the database and prints results.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gradebook_core::db::open_db;
use gradebook_core::{
    init_logging, EnrollmentService, GradeInput, GradeService, GradebookConfig,
    RegistrationService, ReportCardService, SqliteCatalogRepository, SqliteEnrollmentRepository,
    SqliteGradeRepository,
};
use log::debug;
use rusqlite::Connection;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "gradebook")]
#[command(about = "Academic records: students, courses, enrollments, grades and report cards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file (overrides config and GRADEBOOK_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage students
    #[command(subcommand)]
    Student(CatalogCommand),
    /// Manage courses
    #[command(subcommand)]
    Course(CatalogCommand),
    /// Enroll a student in a course
    Enroll { student: Uuid, course: Uuid },
    /// List the courses a student is enrolled in
    CoursesOf { student: Uuid },
    /// List the students enrolled in a course
    StudentsOf { course: Uuid },
    /// Record and inspect grades
    #[command(subcommand)]
    Grade(GradeCommand),
    /// Print a student's report card
    Report {
        student: Uuid,
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Register a new record by name
    Add { name: String },
    /// List records ordered by name
    List,
}

#[derive(Subcommand, Debug)]
enum GradeCommand {
    /// Append a grade (exactly one of --numeric / --letter)
    Record {
        student: Uuid,
        course: Uuid,
        #[command(flatten)]
        value: GradeValueArgs,
    },
    /// Show grade history
    List { student: Uuid, course: Uuid },
    /// Show the rounded average and its letter
    Average { student: Uuid, course: Uuid },
}

#[derive(Args, Debug)]
struct GradeValueArgs {
    /// Numeric grade, 0..=100
    #[arg(long, allow_negative_numbers = true)]
    numeric: Option<i64>,
    /// Letter grade, e.g. B-
    #[arg(long)]
    letter: Option<String>,
}

impl From<GradeValueArgs> for GradeInput {
    fn from(value: GradeValueArgs) -> Self {
        GradeInput {
            numeric: value.numeric,
            letter: value.letter,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }
    debug!(
        "event=cli_start module=cli status=ok core_version={}",
        gradebook_core::core_version()
    );

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open database `{}`", config.db_path.display()))?;
    run(cli.command, &conn)
}

fn resolve_config(cli: &Cli) -> Result<GradebookConfig> {
    resolve_config_with(cli, |key| std::env::var(key).ok())
}

/// Layers defaults, config file, environment lookup and CLI flags, in that
/// order of increasing precedence.
fn resolve_config_with(
    cli: &Cli,
    env: impl Fn(&str) -> Option<String>,
) -> Result<GradebookConfig> {
    let base = match &cli.config {
        Some(path) => GradebookConfig::from_file(path)?,
        None => GradebookConfig::default(),
    };
    let mut config = base.with_env_from(env);

    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    if let Some(dir) = &cli.log_dir {
        config.log_dir = Some(dir.clone());
    }

    config.validate()?;
    Ok(config)
}

fn run(command: Commands, conn: &Connection) -> Result<()> {
    let registration = RegistrationService::new(SqliteCatalogRepository::new(conn));
    let enrollments = EnrollmentService::new(
        SqliteCatalogRepository::new(conn),
        SqliteEnrollmentRepository::new(conn),
    );
    let grades = GradeService::new(
        SqliteEnrollmentRepository::new(conn),
        SqliteGradeRepository::new(conn),
    );

    match command {
        Commands::Student(CatalogCommand::Add { name }) => {
            let student = registration.create_student(&name)?;
            println!("{}", student.id);
        }
        Commands::Student(CatalogCommand::List) => {
            for student in registration.list_students()? {
                println!("{}\t{}", student.id, student.name);
            }
        }
        Commands::Course(CatalogCommand::Add { name }) => {
            let course = registration.create_course(&name)?;
            println!("{}", course.id);
        }
        Commands::Course(CatalogCommand::List) => {
            for course in registration.list_courses()? {
                println!("{}\t{}", course.id, course.name);
            }
        }
        Commands::Enroll { student, course } => {
            let enrollment = enrollments.enroll_student(student, course)?;
            println!("{}", enrollment.id);
        }
        Commands::CoursesOf { student } => {
            for course in enrollments.list_courses_for_student(student)? {
                println!("{}\t{}", course.id, course.name);
            }
        }
        Commands::StudentsOf { course } => {
            for student in enrollments.list_students_for_course(course)? {
                println!("{}\t{}", student.id, student.name);
            }
        }
        Commands::Grade(GradeCommand::Record {
            student,
            course,
            value,
        }) => {
            let grade = grades.record_grade(student, course, &value.into())?;
            println!("{}\t{}", grade.id, grade.numeric_value);
        }
        Commands::Grade(GradeCommand::List { student, course }) => {
            let numeric = grades.get_numeric_grades(student, course)?;
            let letters = grades.get_letter_grades(student, course)?;
            for (value, letter) in numeric.iter().zip(letters) {
                println!("{value}\t{letter}");
            }
        }
        Commands::Grade(GradeCommand::Average { student, course }) => {
            let average = grades.calculate_numeric_average(student, course)?;
            let letter = grades.calculate_letter_average(student, course)?;
            println!("{average}\t{letter}");
        }
        Commands::Report { student, json } => {
            let reports = ReportCardService::new(
                SqliteEnrollmentRepository::new(conn),
                SqliteGradeRepository::new(conn),
            );
            let card = reports.build_report_card(student)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                for course in &card.courses {
                    let history = course
                        .numeric_grades
                        .iter()
                        .map(u8::to_string)
                        .collect::<Vec<_>>()
                        .join(",");
                    println!(
                        "{}\t{}\t{}\t[{}]",
                        course.course_name, course.numeric_average, course.letter_average, history
                    );
                }
            }
        }
    }

    Ok(())
}
