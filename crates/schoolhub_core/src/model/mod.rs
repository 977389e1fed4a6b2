//! Domain records shared by the session and collection layers.
//!
//! # Responsibility
//! - Define the public identity shape returned by authentication.
//! - Define student records and their create/patch/query inputs.
//!
//! # Invariants
//! - Identities never carry password material.
//! - Entity identifiers are assigned once and never change.

pub mod entity;
pub mod identity;
pub mod student;
