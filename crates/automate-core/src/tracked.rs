//! Quantity-observing handles over item stacks.
//!
//! A [`TrackedStack`] snapshots how many of a sample item are available in
//! some backing entity (a chest slot, a machine's held output) and writes
//! every reduction through to that entity. Observers can watch for
//! reductions and for the single transition to empty.
//!
//! A [`TrackedStackCollection`] chains several mutually stackable tracked
//! stacks and drains them in insertion order.

use crate::error::AutomateError;
use crate::item::{Item, ItemStack};
use std::fmt;

// ---------------------------------------------------------------------------
// Backing entities
// ---------------------------------------------------------------------------

/// Something a tracked stack can remove items from.
pub trait StackSource {
    /// Remove up to `quantity` items stackable with `sample`. Returns the
    /// amount actually removed.
    fn remove(&self, sample: &Item, quantity: u32) -> Result<u32, AutomateError>;
}

// ---------------------------------------------------------------------------
// Common contract
// ---------------------------------------------------------------------------

/// Shared contract of tracked stacks and tracked stack collections.
pub trait Tracked {
    /// The sample item, or `None` for an empty collection.
    fn sample(&self) -> Option<&Item>;

    /// How many items are still available.
    fn count(&self) -> u32;

    /// Reduce the count by `min(n, count)` and write the reduction through
    /// to the backing entity. Returns the amount actually reduced.
    fn reduce(&mut self, n: u32) -> Result<u32, AutomateError>;

    /// Reduce by `n` and return an independent stack of what was removed.
    fn take(&mut self, n: u32) -> Result<Option<ItemStack>, AutomateError> {
        let Some(sample) = self.sample().cloned() else {
            return Ok(None);
        };
        let taken = self.reduce(n)?;
        if taken == 0 {
            return Ok(None);
        }
        Ok(Some(ItemStack::new(sample, taken)))
    }
}

// ---------------------------------------------------------------------------
// TrackedStack
// ---------------------------------------------------------------------------

/// Observer called with the sample and the new count after every decrease.
pub type ReducedHook = Box<dyn FnMut(&Item, u32)>;

/// Observer called once, the first time the count reaches zero.
pub type EmptiedHook = Box<dyn FnMut(&Item)>;

/// A quantity of a sample item, decoupled from the stack it was read from.
pub struct TrackedStack {
    source: Option<Box<dyn StackSource>>,
    sample: Item,
    count: u32,
    /// Count at the last notification. Guards against repeat empty events.
    last_notified: u32,
    on_reduced: Vec<ReducedHook>,
    on_emptied: Vec<EmptiedHook>,
}

impl TrackedStack {
    /// Track `stack` as held by `source`.
    ///
    /// Fails with [`AutomateError::InvalidState`] when there is no item to
    /// track; callers check availability first.
    pub fn new(
        source: impl StackSource + 'static,
        stack: Option<&ItemStack>,
    ) -> Result<Self, AutomateError> {
        Self::build(Some(Box::new(source)), stack)
    }

    /// Track a stack that has no backing entity (reductions only affect the
    /// tracked count).
    pub fn detached(stack: &ItemStack) -> Result<Self, AutomateError> {
        Self::build(None, Some(stack))
    }

    fn build(
        source: Option<Box<dyn StackSource>>,
        stack: Option<&ItemStack>,
    ) -> Result<Self, AutomateError> {
        let Some(stack) = stack.filter(|s| s.quantity > 0) else {
            return Err(AutomateError::invalid_state(
                "cannot track an absent or empty item stack",
            ));
        };
        Ok(Self {
            source,
            sample: stack.item.clone(),
            count: stack.quantity,
            last_notified: stack.quantity,
            on_reduced: Vec::new(),
            on_emptied: Vec::new(),
        })
    }

    pub fn item(&self) -> &Item {
        &self.sample
    }

    /// Register an observer for every reduction.
    pub fn on_reduced(&mut self, hook: ReducedHook) {
        self.on_reduced.push(hook);
    }

    /// Register an observer for the transition to empty.
    pub fn on_emptied(&mut self, hook: EmptiedHook) {
        self.on_emptied.push(hook);
    }

    fn notify(&mut self) {
        if self.count >= self.last_notified {
            return;
        }
        for hook in &mut self.on_reduced {
            hook(&self.sample, self.count);
        }
        if self.count == 0 {
            for hook in &mut self.on_emptied {
                hook(&self.sample);
            }
        }
        self.last_notified = self.count;
    }
}

impl Tracked for TrackedStack {
    fn sample(&self) -> Option<&Item> {
        Some(&self.sample)
    }

    fn count(&self) -> u32 {
        self.count
    }

    fn reduce(&mut self, n: u32) -> Result<u32, AutomateError> {
        let amount = n.min(self.count);
        if amount == 0 {
            return Ok(0);
        }
        let removed = match &self.source {
            Some(source) => source.remove(&self.sample, amount)?,
            None => amount,
        };
        // A short removal means the entity ran dry behind our back.
        self.count = if removed < amount {
            0
        } else {
            self.count - removed
        };
        self.notify();
        Ok(removed)
    }
}

impl fmt::Debug for TrackedStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedStack")
            .field("sample", &self.sample.name)
            .field("count", &self.count)
            .field("backed", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// TrackedStackCollection
// ---------------------------------------------------------------------------

/// Several mutually stackable tracked stacks treated as one.
///
/// The first member fixes the sample. Reductions drain members in insertion
/// order, emptying one completely before touching the next.
#[derive(Default)]
pub struct TrackedStackCollection {
    members: Vec<Box<dyn Tracked>>,
}

impl TrackedStackCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `item` could join this collection.
    pub fn can_stack_with(&self, item: &Item) -> bool {
        match self.sample() {
            Some(sample) => sample.can_stack_with(item),
            None => true,
        }
    }

    /// Append a member.
    ///
    /// Fails with [`AutomateError::InvalidState`] if the member has no sample
    /// or cannot stack with the collection's sample.
    pub fn add(&mut self, member: impl Tracked + 'static) -> Result<(), AutomateError> {
        let Some(sample) = member.sample() else {
            return Err(AutomateError::invalid_state(
                "cannot add a tracked stack with no sample",
            ));
        };
        if !self.can_stack_with(sample) {
            return Err(AutomateError::invalid_state(format!(
                "{} cannot stack with {}",
                sample.name,
                self.sample().map(|s| s.name.as_str()).unwrap_or_default()
            )));
        }
        self.members.push(Box::new(member));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Per-member counts, in insertion order.
    pub fn member_counts(&self) -> Vec<u32> {
        self.members.iter().map(|m| m.count()).collect()
    }
}

impl Tracked for TrackedStackCollection {
    fn sample(&self) -> Option<&Item> {
        self.members.first().and_then(|m| m.sample())
    }

    fn count(&self) -> u32 {
        self.members.iter().map(|m| m.count()).sum()
    }

    fn reduce(&mut self, n: u32) -> Result<u32, AutomateError> {
        let mut remaining = n;
        let mut reduced = 0;
        for member in &mut self.members {
            if remaining == 0 {
                break;
            }
            let drained = member.reduce(remaining)?;
            reduced += drained;
            remaining -= drained;
        }
        Ok(reduced)
    }
}

impl fmt::Debug for TrackedStackCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackedStackCollection")
            .field("sample", &self.sample().map(|s| s.name.as_str()))
            .field("members", &self.member_counts())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemTypeId;
    use crate::item::{Inventory, ItemCategory, SharedInventory};
    use std::cell::Cell;
    use std::rc::Rc;

    fn iron_ore() -> Item {
        Item::new(ItemTypeId(380), "Iron Ore", ItemCategory::Metal, 10)
    }

    fn coal() -> Item {
        Item::new(ItemTypeId(382), "Coal", ItemCategory::BuildingResource, 15)
    }

    fn detached(item: Item, quantity: u32) -> TrackedStack {
        TrackedStack::detached(&ItemStack::new(item, quantity)).unwrap()
    }

    #[test]
    fn absent_item_is_invalid_state() {
        let inv = SharedInventory::new(Inventory::new(1));
        let result = TrackedStack::new(inv.slot_source(0), None);
        assert!(matches!(result, Err(AutomateError::InvalidState(_))));

        let empty = ItemStack::new(coal(), 0);
        assert!(matches!(
            TrackedStack::detached(&empty),
            Err(AutomateError::InvalidState(_))
        ));
    }

    #[test]
    fn reduce_clamps_to_count() {
        let mut stack = detached(coal(), 5);
        assert_eq!(stack.reduce(3).unwrap(), 3);
        assert_eq!(stack.count(), 2);
        assert_eq!(stack.reduce(10).unwrap(), 2);
        assert_eq!(stack.count(), 0);
        assert_eq!(stack.reduce(1).unwrap(), 0);
    }

    #[test]
    fn emptied_fires_exactly_once() {
        let emptied = Rc::new(Cell::new(0));
        let reduced = Rc::new(Cell::new(0));
        let mut stack = detached(coal(), 4);
        let e = emptied.clone();
        stack.on_emptied(Box::new(move |_| e.set(e.get() + 1)));
        let r = reduced.clone();
        stack.on_reduced(Box::new(move |_, _| r.set(r.get() + 1)));

        stack.reduce(1).unwrap();
        assert_eq!(emptied.get(), 0);
        stack.reduce(10).unwrap();
        stack.reduce(10).unwrap();
        stack.reduce(1).unwrap();

        assert_eq!(emptied.get(), 1);
        assert_eq!(reduced.get(), 2);
    }

    #[test]
    fn reduced_hook_sees_new_count() {
        let seen = Rc::new(Cell::new(u32::MAX));
        let mut stack = detached(coal(), 9);
        let s = seen.clone();
        stack.on_reduced(Box::new(move |item, count| {
            assert_eq!(item.name, "Coal");
            s.set(count);
        }));
        stack.reduce(4).unwrap();
        assert_eq!(seen.get(), 5);
    }

    #[test]
    fn reduce_writes_through_to_inventory() {
        let inv = SharedInventory::new(Inventory::new(2));
        let _ = inv.borrow_mut().unwrap().add(&coal(), 5);
        let snapshot = inv.borrow().unwrap().slot(0).cloned();
        let mut stack = TrackedStack::new(inv.slot_source(0), snapshot.as_ref()).unwrap();

        stack.reduce(2).unwrap();
        assert_eq!(inv.borrow().unwrap().count_of(coal().item_type), 3);
    }

    #[test]
    fn reduce_reports_what_the_slot_actually_gave() {
        let inv = SharedInventory::new(Inventory::new(1));
        let _ = inv.borrow_mut().unwrap().add(&coal(), 5);
        let snapshot = inv.borrow().unwrap().slot(0).cloned();
        let mut stack = TrackedStack::new(inv.slot_source(0), snapshot.as_ref()).unwrap();
        assert_eq!(inv.borrow_mut().unwrap().remove_from_slot(0, &coal(), 4), 4);

        assert_eq!(stack.reduce(3).unwrap(), 1);
        assert_eq!(stack.count(), 0);
        assert!(inv.borrow().unwrap().slot(0).is_none());
    }

    #[test]
    fn collection_moves_past_a_drained_member() {
        let first = SharedInventory::new(Inventory::new(1));
        let second = SharedInventory::new(Inventory::new(1));
        let _ = first.borrow_mut().unwrap().add(&coal(), 2);
        let _ = second.borrow_mut().unwrap().add(&coal(), 2);
        let mut collection = TrackedStackCollection::new();
        for inv in [&first, &second] {
            let snapshot = inv.borrow().unwrap().slot(0).cloned();
            collection
                .add(TrackedStack::new(inv.slot_source(0), snapshot.as_ref()).unwrap())
                .unwrap();
        }
        assert_eq!(first.borrow_mut().unwrap().remove_from_slot(0, &coal(), 2), 2);

        assert_eq!(collection.reduce(2).unwrap(), 2);
        assert_eq!(collection.member_counts(), vec![0, 0]);
        assert!(second.borrow().unwrap().slot(0).is_none());
    }

    #[test]
    fn take_returns_independent_stack() {
        let inv = SharedInventory::new(Inventory::new(1));
        let _ = inv.borrow_mut().unwrap().add(&coal(), 5);
        let snapshot = inv.borrow().unwrap().slot(0).cloned();
        let mut stack = TrackedStack::new(inv.slot_source(0), snapshot.as_ref()).unwrap();

        let taken = stack.take(7).unwrap().unwrap();
        assert_eq!(taken.quantity, 5);
        assert_eq!(taken.item, coal());
        assert!(inv.borrow().unwrap().slot(0).is_none());
        assert!(stack.take(1).unwrap().is_none());
    }

    #[test]
    fn collection_accepts_anything_when_empty() {
        let collection = TrackedStackCollection::new();
        assert!(collection.can_stack_with(&coal()));
        assert!(collection.sample().is_none());
        assert_eq!(collection.count(), 0);
    }

    #[test]
    fn collection_rejects_unstackable_member() {
        let mut collection = TrackedStackCollection::new();
        collection.add(detached(coal(), 1)).unwrap();
        assert!(!collection.can_stack_with(&iron_ore()));
        let err = collection.add(detached(iron_ore(), 1)).unwrap_err();
        assert!(matches!(err, AutomateError::InvalidState(_)));
    }

    #[test]
    fn collection_rejects_member_without_sample() {
        let mut collection = TrackedStackCollection::new();
        let err = collection.add(TrackedStackCollection::new()).unwrap_err();
        assert!(matches!(err, AutomateError::InvalidState(_)));
    }

    #[test]
    fn collection_drains_in_insertion_order() {
        let mut collection = TrackedStackCollection::new();
        collection.add(detached(iron_ore(), 2)).unwrap();
        collection.add(detached(iron_ore(), 3)).unwrap();
        collection.add(detached(iron_ore(), 4)).unwrap();
        assert_eq!(collection.count(), 9);

        assert_eq!(collection.reduce(4).unwrap(), 4);
        assert_eq!(collection.member_counts(), vec![0, 1, 4]);

        assert_eq!(collection.reduce(1).unwrap(), 1);
        assert_eq!(collection.member_counts(), vec![0, 0, 4]);
    }

    #[test]
    fn collection_take_flattens() {
        let mut collection = TrackedStackCollection::new();
        collection.add(detached(iron_ore(), 2)).unwrap();
        collection.add(detached(iron_ore(), 3)).unwrap();

        let taken = collection.take(4).unwrap().unwrap();
        assert_eq!(taken.quantity, 4);
        assert_eq!(taken.item, iron_ore());
        assert_eq!(collection.count(), 1);
    }

    #[test]
    fn collection_take_zero_is_none() {
        let mut collection = TrackedStackCollection::new();
        collection.add(detached(iron_ore(), 2)).unwrap();
        assert!(collection.take(0).unwrap().is_none());
        assert_eq!(collection.count(), 2);
    }
}
