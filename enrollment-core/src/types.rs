//! Domain types for the course registry.
//!
//! `Course` and `Student` each hold one side of an enrollment: the course
//! counts its seats, the student lists its course codes. Only
//! [`Registry`](crate::registry::Registry) changes both together.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Unique code of a course offering, e.g. `CS101`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseCode(pub String);

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for CourseCode {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CourseCode {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Unique identifier of a student, e.g. `S001`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StudentId(pub String);

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for StudentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for StudentId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// What `add_course` / `add_student` do when the key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Replace the existing entry without complaint, unless it holds
    /// registrations: a course with seated students or a student with
    /// courses is refused like under `Reject`.
    #[default]
    Overwrite,
    /// Refuse the insert with a `Duplicate*` error.
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Overwrite => write!(f, "overwrite"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A course offering with a fixed seat capacity.
///
/// Invariant: `0 <= enrolled <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    code: CourseCode,
    pub title: String,
    pub description: String,
    capacity: u32,
    /// Free-text meeting times, e.g. `MWF 9-10 AM`.
    pub schedule: String,
    enrolled: u32,
}

impl Course {
    /// A new course with no enrolled students.
    pub fn new(
        code: impl Into<CourseCode>,
        title: impl Into<String>,
        description: impl Into<String>,
        capacity: u32,
        schedule: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            description: description.into(),
            capacity,
            schedule: schedule.into(),
            enrolled: 0,
        }
    }

    pub fn code(&self) -> &CourseCode {
        &self.code
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn enrolled(&self) -> u32 {
        self.enrolled
    }

    /// `capacity - enrolled`.
    pub fn available_slots(&self) -> u32 {
        self.capacity - self.enrolled
    }

    pub fn is_full(&self) -> bool {
        self.enrolled >= self.capacity
    }

    /// Take one seat. Returns `false` and leaves the count alone when full.
    #[must_use]
    pub fn enroll(&mut self) -> bool {
        if self.enrolled < self.capacity {
            self.enrolled += 1;
            true
        } else {
            false
        }
    }

    /// Release one seat. Returns `false` and leaves the count alone at zero.
    #[must_use]
    pub fn drop_seat(&mut self) -> bool {
        if self.enrolled > 0 {
            self.enrolled -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn reset_enrollment(&mut self) {
        self.enrolled = 0;
    }
}

/// An enrollee and the codes of the courses it holds a seat in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    id: StudentId,
    pub name: String,
    registered: BTreeSet<CourseCode>,
}

impl Student {
    pub fn new(id: impl Into<StudentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            registered: BTreeSet::new(),
        }
    }

    pub fn id(&self) -> &StudentId {
        &self.id
    }

    /// Adds `code` to the set. Adding a present code is a no-op.
    pub fn register_course(&mut self, code: CourseCode) {
        self.registered.insert(code);
    }

    /// Removes `code` from the set. Removing an absent code is a no-op.
    pub fn drop_course(&mut self, code: &CourseCode) {
        self.registered.remove(code);
    }

    pub fn is_registered(&self, code: &CourseCode) -> bool {
        self.registered.contains(code)
    }

    /// Registered course codes in sorted order.
    pub fn registered_courses(&self) -> impl Iterator<Item = &CourseCode> {
        self.registered.iter()
    }

    pub(crate) fn clear_registrations(&mut self) {
        self.registered.clear();
    }

    pub fn course_count(&self) -> usize {
        self.registered.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
