//! Student use-case service.
//!
//! # Responsibility
//! - Provide the add/edit/delete/search entry points of the student screen.
//! - Compute the dashboard summary counters.
//! - Seed the demo roster shown on first load.
//!
//! # Invariants
//! - All mutations go through `EntityCollection`, so ids stay unique and
//!   insertion order is preserved.
//! - Log events carry ids only, never names or contact fields.

use crate::model::student::{
    Grade, NewStudent, Section, Student, StudentId, StudentPatch, StudentQuery, StudentStatus,
};
use crate::repo::collection::{CollectionError, EntityCollection};
use log::{debug, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for student use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentServiceError {
    /// Target student does not exist.
    StudentNotFound(StudentId),
}

impl Display for StudentServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StudentNotFound(id) => write!(f, "student not found: {id}"),
        }
    }
}

impl Error for StudentServiceError {}

impl From<CollectionError> for StudentServiceError {
    fn from(value: CollectionError) -> Self {
        match value {
            CollectionError::NotFound(id) => Self::StudentNotFound(id),
        }
    }
}

/// Counters shown on the dashboard and above the student list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentSummary {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    /// Every grade is present, with zero when no student is enrolled in it.
    pub by_grade: BTreeMap<Grade, usize>,
}

/// Student facade over an in-memory collection.
#[derive(Debug, Clone, Default)]
pub struct StudentService {
    students: EntityCollection<Student>,
}

impl StudentService {
    /// Creates a service with an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service seeded with [`demo_students`], ids `1..=5`.
    pub fn with_demo_records() -> Self {
        let mut service = Self::new();
        for draft in demo_students() {
            service.students.add(draft);
        }
        debug!(
            "event=student_seed module=student status=ok count={}",
            service.students.len()
        );
        service
    }

    /// Adds a student and returns the stored record with its new id.
    pub fn add_student(&mut self, draft: NewStudent) -> Student {
        let student = self.students.add(draft);
        info!(
            "event=student_add module=student status=ok student_id={}",
            student.id
        );
        student
    }

    /// Merges `patch` into an existing student.
    pub fn update_student(
        &mut self,
        id: StudentId,
        patch: StudentPatch,
    ) -> Result<Student, StudentServiceError> {
        match self.students.update(id, patch) {
            Ok(student) => {
                info!(
                    "event=student_update module=student status=ok student_id={}",
                    id
                );
                Ok(student)
            }
            Err(err) => {
                info!(
                    "event=student_update module=student status=not_found student_id={}",
                    id
                );
                Err(err.into())
            }
        }
    }

    /// Removes a student. The caller is expected to have confirmed first.
    pub fn remove_student(&mut self, id: StudentId) -> bool {
        let removed = self.students.remove(id);
        info!(
            "event=student_remove module=student status={} student_id={}",
            if removed { "ok" } else { "noop" },
            id
        );
        removed
    }

    pub fn get_student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    /// Lazily yields students matching `query`, in roster order.
    pub fn query_students<'a>(
        &'a self,
        query: &'a StudentQuery,
    ) -> impl Iterator<Item = &'a Student> + 'a {
        self.students.query(query)
    }

    pub fn students(&self) -> &EntityCollection<Student> {
        &self.students
    }

    pub fn summary(&self) -> StudentSummary {
        let mut by_grade: BTreeMap<Grade, usize> =
            Grade::ALL.into_iter().map(|grade| (grade, 0)).collect();
        let mut active = 0;
        for student in &self.students {
            *by_grade.entry(student.grade).or_default() += 1;
            if student.is_active() {
                active += 1;
            }
        }

        let total = self.students.len();
        StudentSummary {
            total,
            active,
            inactive: total - active,
            by_grade,
        }
    }
}

/// Roster shown by the student screen before any edits.
///
/// Demo avatars are seeded by first name only.
pub fn demo_students() -> Vec<NewStudent> {
    #[allow(clippy::too_many_arguments)]
    fn student(
        name: &str,
        grade: Grade,
        section: Section,
        roll_no: &str,
        email: &str,
        phone: &str,
        address: &str,
        date_of_birth: &str,
        guardian_name: &str,
        status: StudentStatus,
    ) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            grade,
            section,
            roll_no: roll_no.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            address: address.to_string(),
            date_of_birth: date_of_birth.to_string(),
            guardian_name: guardian_name.to_string(),
            status,
            avatar_seed: name.split_whitespace().next().map(str::to_string),
        }
    }

    vec![
        student(
            "Rahul Sharma",
            Grade::Grade10,
            Section::A,
            "101",
            "rahul.sharma@school.com",
            "+91 98765 43210",
            "123 MG Road, Delhi",
            "2010-05-15",
            "Mr. Vijay Sharma",
            StudentStatus::Active,
        ),
        student(
            "Priya Patel",
            Grade::Grade10,
            Section::B,
            "102",
            "priya.patel@school.com",
            "+91 98765 43211",
            "456 Park Street, Mumbai",
            "2010-08-22",
            "Mrs. Anjali Patel",
            StudentStatus::Active,
        ),
        student(
            "Amit Kumar",
            Grade::Grade9,
            Section::A,
            "201",
            "amit.kumar@school.com",
            "+91 98765 43212",
            "789 Lake Road, Bangalore",
            "2011-03-10",
            "Mr. Rajesh Kumar",
            StudentStatus::Active,
        ),
        student(
            "Sneha Reddy",
            Grade::Grade9,
            Section::B,
            "202",
            "sneha.reddy@school.com",
            "+91 98765 43213",
            "321 Beach Road, Chennai",
            "2011-11-30",
            "Mrs. Lakshmi Reddy",
            StudentStatus::Active,
        ),
        student(
            "Vikram Singh",
            Grade::Grade8,
            Section::A,
            "301",
            "vikram.singh@school.com",
            "+91 98765 43214",
            "555 Hill Street, Pune",
            "2012-07-18",
            "Mr. Suresh Singh",
            StudentStatus::Inactive,
        ),
    ]
}
