//! In-memory record storage.
//!
//! # Responsibility
//! - Hold volatile, insertion-ordered collections of domain entities.
//! - Report missing targets as semantic errors (`NotFound`).
//!
//! Nothing here touches disk; collections live as long as their owner.

pub mod collection;
