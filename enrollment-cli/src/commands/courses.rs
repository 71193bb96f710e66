//! `enroll courses`: course table or JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{course_table, courses_json, load_catalog};

#[derive(Args, Debug)]
pub struct CoursesArgs {
    /// YAML catalog to load instead of the built-in demo data.
    /// Its operations are applied before listing.
    #[arg(long, short = 'c')]
    pub catalog: Option<PathBuf>,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl CoursesArgs {
    pub fn run(self) -> Result<()> {
        let (catalog, mut registry) = load_catalog(self.catalog.as_deref())?;
        let refused = catalog
            .operations
            .iter()
            .filter(|op| op.apply(&mut registry).is_err())
            .count();
        if refused > 0 {
            eprintln!(
                "{refused} of {} catalog operations refused; run `enroll run` for details",
                catalog.operations.len()
            );
        }

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&courses_json(&registry))
                    .context("failed to serialize courses JSON")?
            );
            return Ok(());
        }

        if registry.courses().next().is_none() {
            println!("No courses in catalog.");
            return Ok(());
        }
        println!("{}", course_table(&registry));
        Ok(())
    }
}
