use std::collections::HashSet;

use crate::model::{ItemId, Scene};

/// Tracks which scene items survive redraw passes. Everything outside the
/// persisted set is preview state and is dropped by `clear_transient` before
/// the next preview frame is drawn.
#[derive(Clone, Debug, Default)]
pub struct DrawingRegistry {
    persisted: HashSet<ItemId>,
}

impl DrawingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn persist(&mut self, ids: impl IntoIterator<Item = ItemId>) {
        self.persisted.extend(ids);
    }

    pub fn is_persisted(&self, id: ItemId) -> bool {
        self.persisted.contains(&id)
    }

    pub fn remove(&mut self, ids: &[ItemId]) {
        for id in ids {
            self.persisted.remove(id);
        }
    }

    pub fn reset(&mut self) {
        self.persisted.clear();
    }

    pub fn len(&self) -> usize {
        self.persisted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persisted.is_empty()
    }

    /// Delete every scene item not in the persisted set, returning the
    /// removed ids.
    pub fn clear_transient(&self, scene: &mut Scene) -> Vec<ItemId> {
        scene.retain(|item| self.persisted.contains(&item.id))
    }
}
