//! YAML catalog: seed data and a scripted operation list for a [`Registry`].
//!
//! # File layout
//!
//! ```yaml
//! duplicates: overwrite        # optional; overwrite | reject
//! courses:
//!   - code: CS101
//!     title: Intro to Computer Science
//!     description: Basics of CS
//!     capacity: 30
//!     schedule: MWF 9-10 AM
//! students:
//!   - id: S001
//!     name: John Doe
//! operations:                  # optional
//!   - { action: register, student: S001, course: CS101 }
//!   - { action: drop, student: S001, course: CS101 }
//! ```
//!
//! Catalogs are read-only input; nothing is written back.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, RegistrationError};
use crate::registry::Registry;
use crate::types::{Course, CourseCode, DuplicatePolicy, Student, StudentId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub code: CourseCode,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub capacity: u32,
    #[serde(default)]
    pub schedule: String,
}

impl From<CourseEntry> for Course {
    fn from(e: CourseEntry) -> Self {
        Course::new(e.code, e.title, e.description, e.capacity, e.schedule)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEntry {
    pub id: StudentId,
    pub name: String,
}

impl From<StudentEntry> for Student {
    fn from(e: StudentEntry) -> Self {
        Student::new(e.id, e.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Register,
    Drop,
}

/// One scripted registry call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub action: Action,
    pub student: StudentId,
    pub course: CourseCode,
}

impl Operation {
    pub fn register(student: impl Into<StudentId>, course: impl Into<CourseCode>) -> Self {
        Self {
            action: Action::Register,
            student: student.into(),
            course: course.into(),
        }
    }

    pub fn drop(student: impl Into<StudentId>, course: impl Into<CourseCode>) -> Self {
        Self {
            action: Action::Drop,
            student: student.into(),
            course: course.into(),
        }
    }

    pub fn apply(&self, registry: &mut Registry) -> Result<(), RegistrationError> {
        match self.action {
            Action::Register => registry.register_student(&self.student, &self.course),
            Action::Drop => registry.drop_course(&self.student, &self.course),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.action {
            Action::Register => write!(f, "register {} for {}", self.student, self.course),
            Action::Drop => write!(f, "drop {} from {}", self.student, self.course),
        }
    }
}

/// Parsed catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
    #[serde(default)]
    pub students: Vec<StudentEntry>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Catalog {
    /// The built-in demo dataset: two courses, two students, no operations.
    pub fn demo() -> Self {
        Self {
            duplicates: DuplicatePolicy::Overwrite,
            courses: vec![
                CourseEntry {
                    code: CourseCode::from("CS101"),
                    title: "Intro to Computer Science".to_string(),
                    description: "Basics of CS".to_string(),
                    capacity: 30,
                    schedule: "MWF 9-10 AM".to_string(),
                },
                CourseEntry {
                    code: CourseCode::from("MATH101"),
                    title: "Calculus I".to_string(),
                    description: "Introductory calculus".to_string(),
                    capacity: 25,
                    schedule: "TTh 11-12:30 PM".to_string(),
                },
            ],
            students: vec![
                StudentEntry {
                    id: StudentId::from("S001"),
                    name: "John Doe".to_string(),
                },
                StudentEntry {
                    id: StudentId::from("S002"),
                    name: "Jane Smith".to_string(),
                },
            ],
            operations: vec![],
        }
    }

    /// Registry holding this catalog's courses and students under its policy.
    ///
    /// Operations are not applied; see [`Operation::apply`].
    pub fn build_registry(&self) -> Result<Registry, RegistrationError> {
        let mut registry = Registry::with_policy(self.duplicates);
        for entry in &self.courses {
            registry.add_course(entry.clone().into())?;
        }
        for entry in &self.students {
            registry.add_student(entry.clone().into())?;
        }
        tracing::debug!(
            courses = self.courses.len(),
            students = self.students.len(),
            policy = %self.duplicates,
            "registry built from catalog"
        );
        Ok(registry)
    }
}

/// Load a catalog from `path`.
///
/// Returns `CatalogError::NotFound` if absent,
/// `CatalogError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(path: &Path) -> Result<Catalog, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a catalog and build its registry in one step.
pub fn load_registry_at(path: &Path) -> Result<(Catalog, Registry), CatalogError> {
    let catalog = load_at(path)?;
    let registry = catalog.build_registry()?;
    Ok((catalog, registry))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn demo_builds_two_open_courses() {
        let registry = Catalog::demo().build_registry().expect("build");
        let slots: Vec<_> = registry.courses().map(|c| c.available_slots()).collect();
        assert_eq!(slots, [30, 25]);
        assert_eq!(registry.students().count(), 2);
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let yaml = "courses:\n  - { code: A1, title: Art, capacity: 3 }\n";
        let catalog: Catalog = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(catalog.duplicates, DuplicatePolicy::Overwrite);
        assert_eq!(catalog.courses[0].schedule, "");
        assert!(catalog.students.is_empty());
        assert!(catalog.operations.is_empty());
    }

    #[test]
    fn operations_parse_and_apply() {
        let yaml = "\
courses:
  - { code: A1, title: Art, capacity: 1 }
students:
  - { id: S1, name: Ada }
operations:
  - { action: register, student: S1, course: A1 }
  - { action: drop, student: S1, course: A1 }
";
        let catalog: Catalog = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(catalog.operations[0], Operation::register("S1", "A1"));
        let mut registry = catalog.build_registry().expect("build");
        for op in &catalog.operations {
            op.apply(&mut registry).expect("apply");
        }
        assert_eq!(registry.course(&CourseCode::from("A1")).unwrap().enrolled(), 0);
    }

    #[test]
    fn reject_policy_surfaces_duplicate_in_catalog() {
        let yaml = "\
duplicates: reject
courses:
  - { code: A1, title: Art, capacity: 1 }
  - { code: A1, title: Art again, capacity: 2 }
";
        let catalog: Catalog = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(
            catalog.build_registry().unwrap_err(),
            RegistrationError::DuplicateCourse(CourseCode::from("A1"))
        );
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let dir = TempDir::new().expect("tempdir");
        let err = load_at(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn operation_display() {
        assert_eq!(Operation::register("S1", "A1").to_string(), "register S1 for A1");
        assert_eq!(Operation::drop("S1", "A1").to_string(), "drop S1 from A1");
    }
}
