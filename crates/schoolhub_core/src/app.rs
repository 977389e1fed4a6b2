//! Explicitly owned application state.
//!
//! # Responsibility
//! - Bundle the session store and the student service for one client.
//! - Apply the client-side authentication gate used by the dashboard.
//!
//! # Invariants
//! - Each `AppContext` owns its own session; nothing is shared globally.
//! - `shutdown` always leaves the session logged out.

use crate::auth::credentials::CredentialDirectory;
use crate::auth::session::SessionStore;
use crate::config::{AppConfig, ConfigError};
use crate::service::student_service::{StudentService, StudentSummary};
use log::info;

/// State for one running admin client.
#[derive(Debug, Clone)]
pub struct AppContext {
    session: SessionStore,
    students: StudentService,
}

impl AppContext {
    /// Creates a logged-out context; `seed_demo_students` loads the demo roster.
    pub fn new(directory: CredentialDirectory, seed_demo_students: bool) -> Self {
        let students = if seed_demo_students {
            StudentService::with_demo_records()
        } else {
            StudentService::new()
        };
        info!(
            "event=app_context_init module=app status=ok users={} students={}",
            directory.len(),
            students.students().len()
        );
        Self {
            session: SessionStore::new(directory),
            students,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let directory = config.credential_directory()?;
        Ok(Self::new(directory, config.seed_demo_students))
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    pub fn students(&self) -> &StudentService {
        &self.students
    }

    pub fn students_mut(&mut self) -> &mut StudentService {
        &mut self.students
    }

    /// Dashboard counters, or `None` while logged out.
    ///
    /// This is a client-side convenience check only, not access control.
    pub fn dashboard_summary(&self) -> Option<StudentSummary> {
        self.session
            .is_authenticated()
            .then(|| self.students.summary())
    }

    /// Ends the client session and drops all volatile state.
    pub fn shutdown(mut self) {
        self.session.logout();
        info!("event=app_context_shutdown module=app status=ok");
    }
}
