//! Enrollment core library: domain types, the in-memory registry, catalogs, errors.
//!
//! - [`types`]: newtypes, [`Course`], [`Student`], [`DuplicatePolicy`]
//! - [`error`]: [`RegistrationError`], [`CatalogError`]
//! - [`registry`]: [`Registry`]: register / drop / display
//! - [`catalog`]: YAML seed data and scripted operations

pub mod catalog;
pub mod error;
pub mod registry;
pub mod types;

pub use catalog::{Catalog, Operation};
pub use error::{CatalogError, RegistrationError};
pub use registry::{CourseListing, Registry};
pub use types::{Course, CourseCode, DuplicatePolicy, Student, StudentId};
