//! Identity and behavior contract for collection-managed records.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier assigned by an `EntityCollection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A record type that can live in an `EntityCollection`.
pub trait Entity: Clone {
    /// Creation input; everything except the identifier.
    type Draft;
    /// Partial update; unset fields keep their previous values.
    type Patch;
    /// Filter input for `EntityCollection::query`.
    type Query;

    fn id(&self) -> EntityId;

    /// Builds the entity once its identifier has been assigned.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Merges `patch` over `self`. Must not touch the identifier.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn matches(&self, query: &Self::Query) -> bool;
}
