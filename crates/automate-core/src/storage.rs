//! Storage negotiation: one logical resource pool over a group's containers.
//!
//! A [`Storage`] is built fresh each cycle from a machine group's containers.
//! Matching is a reservation: [`Storage::try_get_ingredient`] returns a
//! [`Consumable`] without touching any inventory, and nothing changes until
//! the caller commits it. A machine can therefore evaluate several recipes
//! and walk away from all but one.

use crate::container::Container;
use crate::error::AutomateError;
use crate::id::ItemTypeId;
use crate::item::{Item, ItemStack};
use crate::recipe::Recipe;
use crate::tracked::{Tracked, TrackedStack, TrackedStackCollection};
use std::collections::BTreeSet;
use std::rc::Rc;
use tracing::trace;

// ---------------------------------------------------------------------------
// Consumable
// ---------------------------------------------------------------------------

/// A reserved ingredient: matching stacks found across the network plus the
/// number of items required.
#[derive(Debug)]
pub struct Consumable {
    stacks: TrackedStackCollection,
    count: u32,
}

impl Consumable {
    pub fn new(stacks: TrackedStackCollection, count: u32) -> Self {
        Self { stacks, count }
    }

    /// The matched sample. A consumable is only handed out when at least one
    /// stack matched, so this is always present for values from [`Storage`].
    pub fn sample(&self) -> Option<&Item> {
        self.stacks.sample()
    }

    /// Number of items this reservation will consume.
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Number of matching items found.
    pub fn available(&self) -> u32 {
        self.stacks.count()
    }

    pub fn is_met(&self) -> bool {
        self.stacks.count() >= self.count
    }

    /// Remove the required items from their containers.
    ///
    /// Fails with [`AutomateError::InvalidState`] if the containers no longer
    /// hold the full amount, for example after an overlapping reservation was
    /// committed first. Whatever could be removed stays removed.
    pub fn commit(mut self) -> Result<(), AutomateError> {
        self.reduce_all()?;
        Ok(())
    }

    /// Remove the required items and return them as one stack.
    pub fn take(mut self) -> Result<Option<ItemStack>, AutomateError> {
        let Some(sample) = self.stacks.sample().cloned() else {
            return Ok(None);
        };
        let taken = self.reduce_all()?;
        Ok((taken > 0).then(|| ItemStack::new(sample, taken)))
    }

    fn reduce_all(&mut self) -> Result<u32, AutomateError> {
        let reduced = self.stacks.reduce(self.count)?;
        if reduced < self.count {
            return Err(AutomateError::invalid_state(format!(
                "reservation of {} {} came up {} short",
                self.count,
                self.stacks.sample().map(|s| s.name.as_str()).unwrap_or_default(),
                self.count - reduced
            )));
        }
        Ok(reduced)
    }
}

// ---------------------------------------------------------------------------
// Storage
// ---------------------------------------------------------------------------

/// A network's containers as one pool.
///
/// Containers sharing an [`InventoryReferenceId`](crate::id::InventoryReferenceId)
/// are collapsed to the first one discovered, before any scan, so a shared
/// inventory never supplies or receives the same item twice.
#[derive(Default)]
pub struct Storage {
    containers: Vec<Rc<dyn Container>>,
}

impl Storage {
    pub fn new(containers: impl IntoIterator<Item = Rc<dyn Container>>) -> Self {
        let mut seen = BTreeSet::new();
        let containers = containers
            .into_iter()
            .filter(|c| seen.insert(c.inventory_ref()))
            .collect();
        Self { containers }
    }

    /// The de-duplicated containers, in discovery order.
    pub fn containers(&self) -> &[Rc<dyn Container>] {
        &self.containers
    }

    /// Total slots across distinct inventories.
    pub fn slot_capacity(&self) -> usize {
        self.containers.iter().map(|c| c.slot_capacity()).sum()
    }

    /// Every item in takeable containers, container by container then slot by
    /// slot. Each container is read only when iteration reaches it; calling
    /// again restarts from the first container.
    pub fn items(&self) -> impl Iterator<Item = Result<TrackedStack, AutomateError>> + '_ {
        self.containers
            .iter()
            .filter(|c| c.can_take())
            .flat_map(|c| match c.stacks() {
                Ok(stacks) => stacks.into_iter().map(Ok).collect::<Vec<_>>(),
                Err(e) => vec![Err(e)],
            })
    }

    /// Total quantity of matching items across the network.
    pub fn count_matching(&self, predicate: impl Fn(&Item) -> bool) -> Result<u32, AutomateError> {
        let mut total = 0u32;
        for stack in self.items() {
            let stack = stack?;
            if predicate(stack.item()) {
                total = total.saturating_add(stack.count());
            }
        }
        Ok(total)
    }

    /// Reserve `count` items matching `predicate`.
    ///
    /// Matching stacks are accumulated in iteration order until `count` is
    /// reached; stacks that cannot stack with the first match are skipped.
    /// Returns `None` if the network doesn't hold enough. Nothing is removed
    /// until the returned [`Consumable`] is committed.
    pub fn try_get_ingredient(
        &self,
        predicate: impl Fn(&Item) -> bool,
        count: u32,
    ) -> Result<Option<Consumable>, AutomateError> {
        let mut found = TrackedStackCollection::new();
        for stack in self.items() {
            if found.count() >= count {
                break;
            }
            let stack = stack?;
            if !predicate(stack.item()) || !found.can_stack_with(stack.item()) {
                continue;
            }
            found.add(stack)?;
        }

        let consumable = Consumable::new(found, count);
        Ok(consumable.is_met().then_some(consumable))
    }

    /// Reserve the input for the first recipe, in slice order, that the
    /// network can satisfy. Declaration order breaks ties.
    pub fn try_get_recipe_ingredient<'r>(
        &self,
        recipes: &'r [Recipe],
    ) -> Result<Option<(Consumable, &'r Recipe)>, AutomateError> {
        for recipe in recipes {
            if let Some(consumable) =
                self.try_get_ingredient(|item| recipe.accepts_input(item), recipe.input_count())?
            {
                return Ok(Some((consumable, recipe)));
            }
        }
        Ok(None)
    }

    /// Match and immediately remove `count` items. Returns whether anything
    /// was consumed.
    pub fn try_consume(
        &self,
        predicate: impl Fn(&Item) -> bool,
        count: u32,
    ) -> Result<bool, AutomateError> {
        match self.try_get_ingredient(predicate, count)? {
            Some(consumable) => {
                consumable.commit()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// [`try_consume`](Self::try_consume) for a fixed item type.
    pub fn try_consume_item(&self, item_type: ItemTypeId, count: u32) -> Result<bool, AutomateError> {
        self.try_consume(|item| item.item_type == item_type, count)
    }

    /// Push as much of `stack` as fits into storing containers, first come
    /// first served. Returns the amount accepted; whatever doesn't fit stays
    /// in `stack`.
    pub fn try_push(&self, stack: &mut dyn Tracked) -> Result<u32, AutomateError> {
        let mut accepted = 0;
        for container in self.containers.iter().filter(|c| c.can_store()) {
            if stack.count() == 0 {
                break;
            }
            let stored = container.store(stack)?;
            if stored > 0 {
                trace!(container = container.name(), stored, "pushed into container");
            }
            accepted += stored;
        }
        Ok(accepted)
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field(
                "containers",
                &self.containers.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
