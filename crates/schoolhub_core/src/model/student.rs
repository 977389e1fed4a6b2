//! Student record model.
//!
//! # Responsibility
//! - Define the student record and its enumerated grade/section/status.
//! - Define create (`NewStudent`), patch (`StudentPatch`) and filter
//!   (`StudentQuery`) inputs used by the collection layer.
//!
//! # Invariants
//! - `id` is assigned by the owning collection and never changes.
//! - `avatar` is derived at creation (from `avatar_seed`, else the name) and
//!   is not recomputed when the name is later edited.
//! - Free-form fields are stored as given, empty strings included.

use crate::model::entity::{Entity, EntityId};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Collection-assigned student identifier.
pub type StudentId = EntityId;

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Grade-filter sentinel that disables grade filtering.
pub const GRADE_FILTER_ALL: &str = "all";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Grade levels offered by the admission form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "Grade 7")]
    Grade7,
    #[serde(rename = "Grade 8")]
    Grade8,
    #[serde(rename = "Grade 9")]
    Grade9,
    #[serde(rename = "Grade 10")]
    Grade10,
}

impl Grade {
    /// All grades, lowest first.
    pub const ALL: [Self; 4] = [Self::Grade7, Self::Grade8, Self::Grade9, Self::Grade10];

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Grade7 => "Grade 7",
            Self::Grade8 => "Grade 8",
            Self::Grade9 => "Grade 9",
            Self::Grade10 => "Grade 10",
        }
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Grade {
    type Err = GradeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|grade| grade.label() == value)
            .ok_or_else(|| GradeParseError(value.to_string()))
    }
}

/// Returned when a grade or grade filter label is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeParseError(pub String);

impl Display for GradeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown grade `{}`; expected `{GRADE_FILTER_ALL}` or Grade 7|8|9|10",
            self.0
        )
    }
}

impl Error for GradeParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    A,
    B,
    C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    Active,
    Inactive,
}

/// One managed student record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub grade: Grade,
    pub section: Section,
    /// Free-form; uniqueness is not enforced.
    pub roll_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Stored as entered (the form uses `YYYY-MM-DD`), never parsed.
    pub date_of_birth: String,
    pub guardian_name: String,
    pub status: StudentStatus,
    /// Avatar URL seeded by the name given at creation.
    pub avatar: String,
}

impl Student {
    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

/// Creation input for a student. Defaults mirror the empty admission form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub grade: Grade,
    pub section: Section,
    pub roll_no: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub date_of_birth: String,
    pub guardian_name: String,
    pub status: StudentStatus,
    /// Avatar seed override; the name is used when `None`.
    pub avatar_seed: Option<String>,
}

impl Default for NewStudent {
    fn default() -> Self {
        Self {
            name: String::new(),
            grade: Grade::Grade10,
            section: Section::A,
            roll_no: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            date_of_birth: String::new(),
            guardian_name: String::new(),
            status: StudentStatus::Active,
            avatar_seed: None,
        }
    }
}

/// Partial student update; `None` keeps the stored value.
///
/// There is deliberately no `avatar` field: the avatar stays as derived at
/// creation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub grade: Option<Grade>,
    pub section: Option<Section>,
    pub roll_no: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub guardian_name: Option<String>,
    pub status: Option<StudentStatus>,
}

/// Grade filter: the `all` sentinel or one exact grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradeFilter {
    #[default]
    All,
    Only(Grade),
}

impl GradeFilter {
    pub fn accepts(self, grade: Grade) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == grade,
        }
    }
}

impl FromStr for GradeFilter {
    type Err = GradeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value == GRADE_FILTER_ALL {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

/// Search-and-filter input for listing students.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentQuery {
    /// Lowercased once at construction for name/email matching.
    search_folded: String,
    search: String,
    grade: GradeFilter,
}

impl StudentQuery {
    pub fn new(search: impl Into<String>, grade: GradeFilter) -> Self {
        let search = search.into();
        Self {
            search_folded: search.to_lowercase(),
            search,
            grade,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn grade(&self) -> GradeFilter {
        self.grade
    }

    /// Name and email match case-insensitively; roll number matches
    /// case-sensitively.
    fn matches_search(&self, student: &Student) -> bool {
        student.name.to_lowercase().contains(&self.search_folded)
            || student.roll_no.contains(&self.search)
            || student.email.to_lowercase().contains(&self.search_folded)
    }
}

impl Entity for Student {
    type Draft = NewStudent;
    type Patch = StudentPatch;
    type Query = StudentQuery;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_draft(id: EntityId, draft: NewStudent) -> Self {
        let avatar = derive_avatar_url(draft.avatar_seed.as_deref().unwrap_or(&draft.name));
        Self {
            id,
            name: draft.name,
            grade: draft.grade,
            section: draft.section,
            roll_no: draft.roll_no,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            date_of_birth: draft.date_of_birth,
            guardian_name: draft.guardian_name,
            status: draft.status,
            avatar,
        }
    }

    fn apply_patch(&mut self, patch: StudentPatch) {
        fn merge<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        merge(&mut self.name, patch.name);
        merge(&mut self.grade, patch.grade);
        merge(&mut self.section, patch.section);
        merge(&mut self.roll_no, patch.roll_no);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.address, patch.address);
        merge(&mut self.date_of_birth, patch.date_of_birth);
        merge(&mut self.guardian_name, patch.guardian_name);
        merge(&mut self.status, patch.status);
    }

    fn matches(&self, query: &StudentQuery) -> bool {
        query.grade.accepts(self.grade) && query.matches_search(self)
    }
}

/// Derives the avatar URL for a student name.
///
/// Whitespace runs collapse to one space and the seed is percent-encoded, so
/// equal names always map to the same URL.
pub fn derive_avatar_url(name: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(name.trim(), " ");
    let mut url = String::with_capacity(AVATAR_BASE_URL.len() + collapsed.len());
    url.push_str(AVATAR_BASE_URL);
    for byte in collapsed.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            url.push(char::from(byte));
        } else {
            url.push_str(&format!("%{byte:02X}"));
        }
    }
    url
}
