//! Error types for enrollment-core.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::{CourseCode, StudentId};

/// Every way a registry mutation can be refused.
///
/// A refused operation never changes registry state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("student {0} not found")]
    StudentNotFound(StudentId),

    #[error("course {0} not found")]
    CourseNotFound(CourseCode),

    /// The course has no free seats left.
    #[error("course {course} is full (capacity {capacity})")]
    CapacityExceeded { course: CourseCode, capacity: u32 },

    #[error("student {student} is already registered for course {course}")]
    AlreadyRegistered {
        student: StudentId,
        course: CourseCode,
    },

    #[error("student {student} is not registered for course {course}")]
    NotRegistered {
        student: StudentId,
        course: CourseCode,
    },

    /// Drop requested while the course counter is already zero.
    #[error("course {course} has no enrolled students to drop")]
    EnrollmentUnderflow { course: CourseCode },

    /// Insert refused by [`DuplicatePolicy::Reject`](crate::types::DuplicatePolicy),
    /// or because the existing course still has seated students.
    #[error("course {0} already exists")]
    DuplicateCourse(CourseCode),

    #[error("student {0} already exists")]
    DuplicateStudent(StudentId),
}

impl RegistrationError {
    /// Stable machine-readable label, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationError::StudentNotFound(_) => "student_not_found",
            RegistrationError::CourseNotFound(_) => "course_not_found",
            RegistrationError::CapacityExceeded { .. } => "capacity_exceeded",
            RegistrationError::AlreadyRegistered { .. } => "already_registered",
            RegistrationError::NotRegistered { .. } => "not_registered",
            RegistrationError::EnrollmentUnderflow { .. } => "enrollment_underflow",
            RegistrationError::DuplicateCourse(_) => "duplicate_course",
            RegistrationError::DuplicateStudent(_) => "duplicate_student",
        }
    }
}

/// Errors from loading a YAML catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Includes file path and line context from serde_yaml.
    #[error("failed to parse catalog at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("catalog not found at {path}")]
    NotFound { path: PathBuf },

    /// The catalog's own courses/students clash under its duplicate policy.
    #[error("catalog rejected: {0}")]
    Registration(#[from] RegistrationError),
}
