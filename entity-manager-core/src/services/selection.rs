//! Selection tracker

use indexmap::IndexSet;

use crate::types::EntityId;

/// Set of selected entity ids, kept in selection order.
///
/// Membership is independent of filtering and expansion, and ids are never
/// validated against the current snapshot: an id stays selected until an
/// operation removes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: IndexSet<EntityId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of one id. Returns `true` when the id is now selected.
    pub fn toggle(&mut self, entity_id: &EntityId) -> bool {
        if self.ids.shift_remove(entity_id) {
            false
        } else {
            self.ids.insert(entity_id.clone());
            true
        }
    }

    pub fn insert(&mut self, entity_id: EntityId) -> bool {
        self.ids.insert(entity_id)
    }

    pub fn remove(&mut self, entity_id: &str) -> bool {
        self.ids.shift_remove(entity_id)
    }

    pub fn add_all<I>(&mut self, entity_ids: I)
    where
        I: IntoIterator<Item = EntityId>,
    {
        self.ids.extend(entity_ids);
    }

    pub fn remove_all<'a, I>(&mut self, entity_ids: I)
    where
        I: IntoIterator<Item = &'a EntityId>,
    {
        for entity_id in entity_ids {
            self.ids.shift_remove(entity_id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, entity_id: &str) -> bool {
        self.ids.contains(entity_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityId> {
        self.ids.iter()
    }

    /// Snapshot of the selected ids in selection order
    pub fn to_vec(&self) -> Vec<EntityId> {
        self.ids.iter().cloned().collect()
    }
}

impl FromIterator<EntityId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = EntityId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}
