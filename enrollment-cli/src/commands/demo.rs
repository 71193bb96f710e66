//! `enroll demo`: the scripted walkthrough over the built-in catalog.

use anyhow::Result;

use enrollment_core::{Operation, Registry};

use super::{describe, load_catalog};

pub fn run() -> Result<()> {
    let (_, mut registry) = load_catalog(None)?;

    show(&registry, "Available Courses:");

    for op in [
        Operation::register("S001", "CS101"),
        Operation::register("S002", "MATH101"),
    ] {
        let result = op.apply(&mut registry);
        println!("{}", describe(&op, &result));
    }
    show(&registry, "Available Courses after Registration:");

    let op = Operation::drop("S001", "CS101");
    let result = op.apply(&mut registry);
    println!("{}", describe(&op, &result));
    show(&registry, "Available Courses after Dropping:");

    Ok(())
}

fn show(registry: &Registry, heading: &str) {
    println!("{heading}");
    print!("{}", registry.display_courses());
}
