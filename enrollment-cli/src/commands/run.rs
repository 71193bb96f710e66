//! `enroll run --catalog <path>`: apply scripted operations and report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use enrollment_core::{catalog::Action, Operation, RegistrationError};

use super::{course_table, courses_json, describe, load_catalog, students_json, CourseJson, StudentJson};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// YAML catalog with courses, students and operations.
    #[arg(long, short = 'c')]
    pub catalog: PathBuf,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct RunReportJson {
    summary: RunSummaryJson,
    operations: Vec<OperationJson>,
    courses: Vec<CourseJson>,
    students: Vec<StudentJson>,
}

#[derive(Serialize)]
struct RunSummaryJson {
    applied: usize,
    refused: usize,
}

#[derive(Serialize)]
struct OperationJson {
    action: Action,
    student: String,
    course: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RunArgs {
    pub fn run(self) -> Result<()> {
        let (catalog, mut registry) = load_catalog(Some(self.catalog.as_path()))?;

        let outcomes: Vec<(&Operation, Result<(), RegistrationError>)> = catalog
            .operations
            .iter()
            .map(|op| (op, op.apply(&mut registry)))
            .collect();
        let refused = outcomes.iter().filter(|(_, r)| r.is_err()).count();

        if self.json {
            let payload = RunReportJson {
                summary: RunSummaryJson {
                    applied: outcomes.len() - refused,
                    refused,
                },
                operations: outcomes
                    .iter()
                    .map(|(op, result)| OperationJson {
                        action: op.action,
                        student: op.student.to_string(),
                        course: op.course.to_string(),
                        ok: result.is_ok(),
                        error_kind: result.as_ref().err().map(RegistrationError::kind),
                        error: result.as_ref().err().map(ToString::to_string),
                    })
                    .collect(),
                courses: courses_json(&registry),
                students: students_json(&registry),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&payload).context("failed to serialize run JSON")?
            );
            return Ok(());
        }

        if outcomes.is_empty() {
            println!("No operations in catalog.");
        }
        for (op, result) in &outcomes {
            let line = describe(op, result);
            match result {
                Ok(()) => println!("{} {}", "✓".green().bold(), line),
                Err(_) => println!("{} {}", "✗".red().bold(), line.red()),
            }
        }

        println!();
        println!("{}", course_table(&registry));
        for student in registry.students() {
            let codes: Vec<String> = student.registered_courses().map(|c| c.to_string()).collect();
            let list = if codes.is_empty() {
                "(none)".bright_black().to_string()
            } else {
                codes.join(", ")
            };
            println!("{} {}: {}", student.id().to_string().bold(), student.name, list);
        }
        println!(
            "{} applied, {} refused",
            outcomes.len() - refused,
            refused
        );
        Ok(())
    }
}
