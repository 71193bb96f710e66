//! Subcommands plus the output pieces they share.

pub mod courses;
pub mod demo;
pub mod run;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use enrollment_core::{
    catalog::{self, Action},
    Catalog, Course, Operation, RegistrationError, Registry,
};

/// Catalog at `path`, or the built-in demo catalog when `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<(Catalog, Registry)> {
    match path {
        Some(path) => catalog::load_registry_at(path)
            .with_context(|| format!("failed to load catalog '{}'", path.display())),
        None => {
            let catalog = Catalog::demo();
            let registry = catalog
                .build_registry()
                .context("built-in demo catalog is invalid")?;
            Ok((catalog, registry))
        }
    }
}

/// One console line describing what an operation did.
pub fn describe(op: &Operation, result: &Result<(), RegistrationError>) -> String {
    match (op.action, result) {
        (Action::Register, Ok(())) => {
            format!("Student {} registered for course {}", op.student, op.course)
        }
        (Action::Register, Err(err)) => format!(
            "Registration failed for student {} and course {}: {err}",
            op.student, op.course
        ),
        (Action::Drop, Ok(())) => {
            format!("Student {} dropped course {}", op.student, op.course)
        }
        (Action::Drop, Err(err)) => format!(
            "Course drop failed for student {} and course {}: {err}",
            op.student, op.course
        ),
    }
}

#[derive(Tabled)]
struct CourseTableRow {
    #[tabled(rename = "code")]
    code: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "schedule")]
    schedule: String,
    #[tabled(rename = "capacity")]
    capacity: u32,
    #[tabled(rename = "enrolled")]
    enrolled: u32,
    #[tabled(rename = "available")]
    available: u32,
}

#[derive(Debug, Serialize)]
pub struct CourseJson {
    code: String,
    title: String,
    description: String,
    schedule: String,
    capacity: u32,
    enrolled: u32,
    available: u32,
    roster: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct StudentJson {
    id: String,
    name: String,
    courses: Vec<String>,
}

pub fn course_table(registry: &Registry) -> String {
    let rows: Vec<CourseTableRow> = registry
        .courses()
        .map(|c| CourseTableRow {
            code: c.code().to_string(),
            title: c.title.clone(),
            schedule: c.schedule.clone(),
            capacity: c.capacity(),
            enrolled: c.enrolled(),
            available: c.available_slots(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

pub fn courses_json(registry: &Registry) -> Vec<CourseJson> {
    registry
        .courses()
        .map(|c: &Course| CourseJson {
            code: c.code().to_string(),
            title: c.title.clone(),
            description: c.description.clone(),
            schedule: c.schedule.clone(),
            capacity: c.capacity(),
            enrolled: c.enrolled(),
            available: c.available_slots(),
            roster: registry.roster(c.code()).iter().map(|id| id.to_string()).collect(),
        })
        .collect()
}

pub fn students_json(registry: &Registry) -> Vec<StudentJson> {
    registry
        .students()
        .map(|s| StudentJson {
            id: s.id().to_string(),
            name: s.name.clone(),
            courses: s.registered_courses().map(|c| c.to_string()).collect(),
        })
        .collect()
}
