//! In-memory course registry.
//!
//! # Consistency
//!
//! A student's registered set and a course's enrolled counter describe the
//! same fact from two sides. [`Registry`] owns both collections and is the
//! only place that mutates either side, so for every course:
//!
//! ```text
//! course.enrolled() == |{ s : s.is_registered(course.code()) }|
//! ```
//!
//! Every mutating method checks all preconditions first and only then
//! touches state, so a refused operation leaves the registry unchanged.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::RegistrationError;
use crate::types::{Course, CourseCode, DuplicatePolicy, Student, StudentId};

/// Owner of all courses and students.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    courses: BTreeMap<CourseCode, Course>,
    students: BTreeMap<StudentId, Student>,
    policy: DuplicatePolicy,
}

impl Registry {
    /// Empty registry with the default [`DuplicatePolicy::Overwrite`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    // -----------------------------------------------------------------------
    // 1. Inserts
    // -----------------------------------------------------------------------

    /// Insert a course keyed by its code.
    ///
    /// Under `Overwrite` an existing course is replaced, unless students hold
    /// seats in it. Under `Reject` any existing code is refused. The stored
    /// course always starts with zero enrolled.
    pub fn add_course(&mut self, mut course: Course) -> Result<(), RegistrationError> {
        if let Some(existing) = self.courses.get(course.code()) {
            if self.policy == DuplicatePolicy::Reject || existing.enrolled() > 0 {
                tracing::warn!(course = %course.code(), "duplicate course refused");
                return Err(RegistrationError::DuplicateCourse(course.code().clone()));
            }
            tracing::debug!(course = %course.code(), "replacing course");
        }
        // Seats are only ever taken through the registry.
        course.reset_enrollment();
        self.courses.insert(course.code().clone(), course);
        Ok(())
    }

    /// Insert a student keyed by its id.
    ///
    /// Same policy rules as [`add_course`](Self::add_course); a student with
    /// registrations is never replaced. The stored student starts with an
    /// empty registered set.
    pub fn add_student(&mut self, mut student: Student) -> Result<(), RegistrationError> {
        if let Some(existing) = self.students.get(student.id()) {
            if self.policy == DuplicatePolicy::Reject || existing.course_count() > 0 {
                tracing::warn!(student = %student.id(), "duplicate student refused");
                return Err(RegistrationError::DuplicateStudent(student.id().clone()));
            }
            tracing::debug!(student = %student.id(), "replacing student");
        }
        student.clear_registrations();
        self.students.insert(student.id().clone(), student);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 2. Enrollment
    // -----------------------------------------------------------------------

    /// Give `student_id` a seat in `course_code`.
    ///
    /// Refused when either entity is missing, the student already holds a
    /// seat there, or the course is full.
    pub fn register_student(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        let result = self.try_register(student_id, course_code);
        match &result {
            Ok(()) => tracing::debug!(student = %student_id, course = %course_code, "registered"),
            Err(err) => {
                tracing::warn!(student = %student_id, course = %course_code, error = %err, "registration refused")
            }
        }
        result
    }

    fn try_register(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistrationError::StudentNotFound(student_id.clone()))?;
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistrationError::CourseNotFound(course_code.clone()))?;

        if student.is_registered(course_code) {
            return Err(RegistrationError::AlreadyRegistered {
                student: student_id.clone(),
                course: course_code.clone(),
            });
        }
        if !course.enroll() {
            return Err(RegistrationError::CapacityExceeded {
                course: course_code.clone(),
                capacity: course.capacity(),
            });
        }
        student.register_course(course_code.clone());
        Ok(())
    }

    /// Release the seat `student_id` holds in `course_code`.
    ///
    /// Refused when either entity is missing or the student is not
    /// registered for the course.
    pub fn drop_course(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        let result = self.try_drop(student_id, course_code);
        match &result {
            Ok(()) => tracing::debug!(student = %student_id, course = %course_code, "dropped"),
            Err(err) => {
                tracing::warn!(student = %student_id, course = %course_code, error = %err, "drop refused")
            }
        }
        result
    }

    fn try_drop(
        &mut self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<(), RegistrationError> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RegistrationError::StudentNotFound(student_id.clone()))?;
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| RegistrationError::CourseNotFound(course_code.clone()))?;

        if !student.is_registered(course_code) {
            return Err(RegistrationError::NotRegistered {
                student: student_id.clone(),
                course: course_code.clone(),
            });
        }
        // Counter first: if it is already zero nothing has been touched yet.
        if !course.drop_seat() {
            return Err(RegistrationError::EnrollmentUnderflow {
                course: course_code.clone(),
            });
        }
        student.drop_course(course_code);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // 3. Reads
    // -----------------------------------------------------------------------

    pub fn course(&self, code: &CourseCode) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn student(&self, id: &StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    /// All courses in code order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// All students in id order.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// Ids of the students holding a seat in `code`, in id order.
    pub fn roster(&self, code: &CourseCode) -> Vec<&StudentId> {
        self.students
            .values()
            .filter(|s| s.is_registered(code))
            .map(Student::id)
            .collect()
    }

    /// Every (student, course) registration pair.
    pub fn enrollments(&self) -> impl Iterator<Item = (&StudentId, &CourseCode)> {
        self.students
            .values()
            .flat_map(|s| s.registered_courses().map(move |c| (s.id(), c)))
    }

    /// Re-derives each course's count from the student sets and checks it
    /// against the stored counter. Also fails on dangling course codes.
    pub fn is_consistent(&self) -> bool {
        let mut derived: BTreeMap<&CourseCode, u32> = BTreeMap::new();
        for (_, code) in self.enrollments() {
            if !self.courses.contains_key(code) {
                return false;
            }
            *derived.entry(code).or_default() += 1;
        }
        self.courses.values().all(|course| {
            let count = derived.get(course.code()).copied().unwrap_or(0);
            count == course.enrolled() && course.enrolled() <= course.capacity()
        })
    }

    /// Human-readable listing of every course and its free seats.
    pub fn display_courses(&self) -> CourseListing<'_> {
        CourseListing { registry: self }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Registry::display_courses`].
///
/// One block per course, each followed by a blank line.
pub struct CourseListing<'a> {
    registry: &'a Registry,
}

impl fmt::Display for CourseListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for course in self.registry.courses() {
            writeln!(f, "Course Code: {}", course.code())?;
            writeln!(f, "Title: {}", course.title)?;
            writeln!(f, "Description: {}", course.description)?;
            writeln!(f, "Capacity: {}", course.capacity())?;
            writeln!(f, "Schedule: {}", course.schedule)?;
            writeln!(f, "Available Slots: {}", course.available_slots())?;
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
