//! Core state model for the SchoolHub admin dashboard.
//! Session handling and record collections live here; screens only call in.

pub mod app;
pub mod auth;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use app::AppContext;
pub use auth::credentials::{
    CredentialDirectory, CredentialDirectoryBuilder, CredentialError, CredentialRecord,
    PasswordVerifier, DEMO_ADMIN_EMAIL, DEMO_ADMIN_PASSWORD,
};
pub use auth::session::{Session, SessionStore};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{Entity, EntityId};
pub use model::identity::Identity;
pub use model::student::{
    derive_avatar_url, Grade, GradeFilter, GradeParseError, NewStudent, Section, Student,
    StudentId, StudentPatch, StudentQuery, StudentStatus, GRADE_FILTER_ALL,
};
pub use repo::collection::{CollectionError, CollectionResult, EntityCollection};
pub use service::student_service::{
    demo_students, StudentService, StudentServiceError, StudentSummary,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
