//! Core use-case services.
//!
//! # Responsibility
//! - Wrap collections in use-case level APIs for the presentation layer.
//! - Keep screen code decoupled from storage details.

pub mod student_service;
