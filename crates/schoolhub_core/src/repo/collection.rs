//! Generic in-memory entity collection.
//!
//! # Responsibility
//! - Own one ordered, volatile collection per entity type.
//! - Assign identifiers and apply create/patch/remove/query operations.
//!
//! # Invariants
//! - Identifiers come from a monotonically increasing sequence and are never
//!   reissued, even after the entity holding one is removed.
//! - Insertion order is preserved by every operation.
//! - `update` never alters an identifier.
//! - No field validation happens here; callers own input correctness.

use crate::model::entity::{Entity, EntityId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors raised by collection operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// No entity with this id is currently in the collection.
    NotFound(EntityId),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
        }
    }
}

impl Error for CollectionError {}

/// Monotonic identifier source.
#[derive(Debug, Clone)]
struct IdSequence {
    next: u64,
}

impl IdSequence {
    const fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    fn allocate(&mut self) -> EntityId {
        let id = EntityId::new(self.next);
        self.next += 1;
        id
    }
}

/// Ordered in-memory collection of one entity type.
#[derive(Debug, Clone)]
pub struct EntityCollection<E: Entity> {
    items: Vec<E>,
    ids: IdSequence,
}

impl<E: Entity> Default for EntityCollection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityCollection<E> {
    /// Creates an empty collection whose first assigned id is `1`.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: IdSequence::starting_at(1),
        }
    }

    /// Appends a new entity built from `draft` and returns it.
    pub fn add(&mut self, draft: E::Draft) -> E {
        let id = self.ids.allocate();
        let entity = E::from_draft(id, draft);
        self.items.push(entity.clone());
        entity
    }

    /// Merges `patch` into the entity with `id` and returns the result.
    pub fn update(&mut self, id: EntityId, patch: E::Patch) -> CollectionResult<E> {
        let entity = self
            .items
            .iter_mut()
            .find(|entity| entity.id() == id)
            .ok_or(CollectionError::NotFound(id))?;
        entity.apply_patch(patch);
        debug_assert_eq!(entity.id(), id);
        Ok(entity.clone())
    }

    /// Removes the entity with `id`. Returns whether anything was removed.
    ///
    /// Confirmation belongs to the caller; this never prompts.
    pub fn remove(&mut self, id: EntityId) -> bool {
        match self.items.iter().position(|entity| entity.id() == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.items.iter().find(|entity| entity.id() == id)
    }

    /// Lazily yields entities matching `query`, in insertion order.
    ///
    /// Each call starts a fresh pass; nothing is cached between calls.
    pub fn query<'a>(&'a self, query: &'a E::Query) -> impl Iterator<Item = &'a E> + 'a {
        self.items.iter().filter(move |entity| entity.matches(query))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntityCollection<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionError, EntityCollection};
    use crate::model::entity::{Entity, EntityId};
    use std::collections::HashSet;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Room {
        id: EntityId,
        label: String,
        capacity: u32,
    }

    #[derive(Default)]
    struct RoomPatch {
        label: Option<String>,
        capacity: Option<u32>,
    }

    impl Entity for Room {
        type Draft = (String, u32);
        type Patch = RoomPatch;
        type Query = u32;

        fn id(&self) -> EntityId {
            self.id
        }

        fn from_draft(id: EntityId, (label, capacity): Self::Draft) -> Self {
            Self {
                id,
                label,
                capacity,
            }
        }

        fn apply_patch(&mut self, patch: Self::Patch) {
            if let Some(label) = patch.label {
                self.label = label;
            }
            if let Some(capacity) = patch.capacity {
                self.capacity = capacity;
            }
        }

        fn matches(&self, min_capacity: &u32) -> bool {
            self.capacity >= *min_capacity
        }
    }

    fn rooms() -> EntityCollection<Room> {
        let mut rooms = EntityCollection::new();
        rooms.add(("lab".to_string(), 20));
        rooms.add(("hall".to_string(), 200));
        rooms.add(("library".to_string(), 60));
        rooms
    }

    #[test]
    fn ids_start_at_one_and_stay_distinct_after_removal() {
        let mut rooms = rooms();
        assert_eq!(rooms.iter().map(|r| r.id.get()).collect::<Vec<_>>(), [1, 2, 3]);

        assert!(rooms.remove(EntityId::new(3)));
        let added = rooms.add(("annex".to_string(), 10));
        assert_eq!(added.id, EntityId::new(4));

        let ids: HashSet<_> = rooms.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), rooms.len());
    }

    #[test]
    fn update_merges_patch_and_keeps_id() {
        let mut rooms = rooms();
        let updated = rooms
            .update(
                EntityId::new(2),
                RoomPatch {
                    capacity: Some(150),
                    ..RoomPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, EntityId::new(2));
        assert_eq!(updated.label, "hall");
        assert_eq!(updated.capacity, 150);
        assert_eq!(rooms.get(EntityId::new(2)), Some(&updated));
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let mut rooms = rooms();
        let err = rooms
            .update(EntityId::new(99), RoomPatch::default())
            .unwrap_err();
        assert_eq!(err, CollectionError::NotFound(EntityId::new(99)));
        assert_eq!(err.to_string(), "entity not found: 99");
    }

    #[test]
    fn remove_twice_reports_false_second_time() {
        let mut rooms = rooms();
        assert!(rooms.remove(EntityId::new(1)));
        assert!(!rooms.remove(EntityId::new(1)));
        assert_eq!(rooms.len(), 2);
    }

    #[test]
    fn query_is_order_preserving_and_restartable() {
        let rooms = rooms();
        let min = 50;
        let first: Vec<_> = rooms.query(&min).map(|r| r.label.as_str()).collect();
        let second: Vec<_> = rooms.query(&min).map(|r| r.label.as_str()).collect();
        assert_eq!(first, ["hall", "library"]);
        assert_eq!(first, second);
    }
}
