/// Item registry: owns every item and its rating state.
///
/// Items are identified by caller-provided `i64` IDs and stored in insertion
/// order; an ID -> index map keeps lookups O(1). Order is stable for the whole
/// session, so snapshots can be restored without remapping.
use std::collections::HashMap;

use crate::error::{EngineError, Result};
use crate::types::{EliteType, Item, ItemInput, ItemStatus};

#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<Item>,
    id_to_idx: HashMap<i64, usize>,
}

impl ItemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole registry. All stats start at their defaults.
    ///
    /// Rejects duplicate IDs; on error the registry is left as it was.
    pub fn initialize(&mut self, inputs: Vec<ItemInput>) -> Result<()> {
        let mut id_to_idx = HashMap::with_capacity(inputs.len());
        for (idx, input) in inputs.iter().enumerate() {
            if id_to_idx.insert(input.id, idx).is_some() {
                return Err(EngineError::DuplicateId(input.id));
            }
        }
        self.items = inputs.into_iter().map(Item::new).collect();
        self.id_to_idx = id_to_idx;
        Ok(())
    }

    pub fn add(&mut self, input: ItemInput) -> Result<()> {
        if self.id_to_idx.contains_key(&input.id) {
            return Err(EngineError::DuplicateId(input.id));
        }
        self.id_to_idx.insert(input.id, self.items.len());
        self.items.push(Item::new(input));
        Ok(())
    }

    pub fn remove(&mut self, id: i64) -> Result<Item> {
        let idx = self.id_to_idx.get(&id).copied().ok_or(EngineError::UnknownItem(id))?;
        let removed = self.items.remove(idx);
        self.reindex();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.id_to_idx.clear();
    }

    /// Reset every item to default rating, sigma, counters and `Active`.
    pub fn reset_stats(&mut self) {
        for item in &mut self.items {
            item.reset();
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.id_to_idx.contains_key(&id)
    }

    pub fn get(&self, id: i64) -> Option<&Item> {
        self.id_to_idx.get(&id).map(|&idx| &self.items[idx])
    }

    pub(crate) fn get_mut(&mut self, id: i64) -> Option<&mut Item> {
        match self.id_to_idx.get(&id) {
            Some(&idx) => Some(&mut self.items[idx]),
            None => None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn active(&self) -> impl Iterator<Item = &Item> {
        self.with_status(ItemStatus::Active)
    }

    pub fn frozen(&self) -> impl Iterator<Item = &Item> {
        self.with_status(ItemStatus::Frozen)
    }

    pub fn eliminated(&self) -> impl Iterator<Item = &Item> {
        self.with_status(ItemStatus::Eliminated)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn frozen_count(&self) -> usize {
        self.frozen().count()
    }

    pub fn eliminated_count(&self) -> usize {
        self.eliminated().count()
    }

    /// Sum of sigma over every item, regardless of status.
    pub fn total_sigma(&self) -> f64 {
        self.items.iter().map(|i| i.sigma).sum()
    }

    pub fn active_sigma(&self) -> f64 {
        self.active().map(|i| i.sigma).sum()
    }

    /// Freeze an active item. Returns false (and changes nothing) if the item
    /// is unknown or already resolved.
    pub(crate) fn freeze(&mut self, id: i64, elite_type: EliteType) -> bool {
        match self.get_mut(id) {
            Some(item) if item.is_active() => {
                item.status = ItemStatus::Frozen;
                item.elite_type = elite_type;
                true
            }
            _ => false,
        }
    }

    /// Eliminate an active item. Same contract as [`freeze`](Self::freeze).
    pub(crate) fn eliminate(&mut self, id: i64) -> bool {
        match self.get_mut(id) {
            Some(item) if item.is_active() => {
                item.status = ItemStatus::Eliminated;
                true
            }
            _ => false,
        }
    }

    /// Deep copy of all items, in registry order.
    pub(crate) fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Replace all items with a previous snapshot.
    pub(crate) fn restore(&mut self, items: Vec<Item>) {
        self.items = items;
        self.reindex();
    }

    fn with_status(&self, status: ItemStatus) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.status == status)
    }

    fn reindex(&mut self) {
        self.id_to_idx = self.items.iter().enumerate().map(|(idx, item)| (item.id, idx)).collect();
    }
}

#[cfg(test)]
pub(crate) fn input(id: i64) -> ItemInput {
    ItemInput {
        id,
        name: format!("img-{id}.png"),
        image_ref: format!("/tmp/img-{id}.png"),
    }
}
