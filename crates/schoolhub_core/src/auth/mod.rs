//! Authentication and session state.
//!
//! # Responsibility
//! - Verify login pairs against a read-only credential directory.
//! - Track the single current identity for one running client.
//!
//! # Invariants
//! - At most one identity is current at a time.
//! - Password material never leaves the credential directory.

pub mod credentials;
pub mod session;
