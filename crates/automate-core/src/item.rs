use crate::error::AutomateError;
use crate::id::{InventoryReferenceId, ItemTypeId};
use crate::tracked::StackSource;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Item samples
// ---------------------------------------------------------------------------

/// Item quality tier.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Quality {
    #[default]
    Normal,
    Silver,
    Gold,
    Iridium,
}

/// Item category as defined by the host game's object data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    None,
    Gem,
    Mineral,
    Metal,
    BuildingResource,
    Junk,
    Fish,
    Egg,
    Milk,
    ArtisanGoods,
    Syrup,
    Crafting,
    Seeds,
    Vegetable,
    Fruit,
    Flower,
    Forage,
}

/// What an artisan good was made from (the fruit in a wine, the vegetable in
/// a pickle). Part of an item's stacking identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PreserveKind {
    Wine,
    Juice,
    Jelly,
    Pickles,
    Honey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Preserve {
    pub kind: PreserveKind,
    pub parent: ItemTypeId,
}

/// A sample item: everything about an item except how many there are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_type: ItemTypeId,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub quality: Quality,
    pub price: u32,
    #[serde(default)]
    pub preserve: Option<Preserve>,
}

impl Item {
    pub fn new(
        item_type: ItemTypeId,
        name: impl Into<String>,
        category: ItemCategory,
        price: u32,
    ) -> Self {
        Self {
            item_type,
            name: name.into(),
            category,
            quality: Quality::Normal,
            price,
            preserve: None,
        }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_preserve(mut self, kind: PreserveKind, parent: ItemTypeId) -> Self {
        self.preserve = Some(Preserve { kind, parent });
        self
    }

    /// Whether two samples can share one stack. Compared by value (type,
    /// category, name, quality, preserved parent), never by identity.
    pub fn can_stack_with(&self, other: &Item) -> bool {
        self.item_type == other.item_type
            && self.category == other.category
            && self.quality == other.quality
            && self.preserve == other.preserve
            && self.name == other.name
    }
}

/// A quantity of one sample item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Item,
    pub quantity: u32,
}

impl ItemStack {
    pub fn new(item: Item, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// A fixed number of slots, each holding at most `max_stack` of one item.
///
/// Emptied slots become `None` instead of shifting, so slot indices handed
/// out during a cycle stay valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    slots: Vec<Option<ItemStack>>,
    max_stack: u32,
}

impl Inventory {
    pub const DEFAULT_MAX_STACK: u32 = 999;

    pub fn new(capacity: usize) -> Self {
        Self::with_max_stack(capacity, Self::DEFAULT_MAX_STACK)
    }

    pub fn with_max_stack(capacity: usize, max_stack: u32) -> Self {
        Self {
            slots: vec![None; capacity],
            max_stack: max_stack.max(1),
        }
    }

    /// Number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_stack(&self) -> u32 {
        self.max_stack
    }

    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&ItemStack> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// How many of `item` would fit, across partial stacks and empty slots.
    pub fn space_for(&self, item: &Item) -> u32 {
        self.slots
            .iter()
            .map(|slot| match slot {
                Some(stack) if stack.item.can_stack_with(item) => {
                    self.max_stack.saturating_sub(stack.quantity)
                }
                Some(_) => 0,
                None => self.max_stack,
            })
            .fold(0u32, u32::saturating_add)
    }

    /// Add items, topping up existing stacks before using empty slots.
    /// Returns the amount that didn't fit.
    #[must_use = "overflow count indicates items that did not fit"]
    pub fn add(&mut self, item: &Item, quantity: u32) -> u32 {
        let mut remaining = quantity;

        for stack in self.slots.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if stack.item.can_stack_with(item) {
                let moved = remaining.min(self.max_stack.saturating_sub(stack.quantity));
                stack.quantity += moved;
                remaining -= moved;
            }
        }

        for slot in self.slots.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(self.max_stack);
                *slot = Some(ItemStack::new(item.clone(), moved));
                remaining -= moved;
            }
        }

        remaining
    }

    /// Remove up to `quantity` from one slot, only if it still holds an item
    /// stackable with `sample`. Returns the amount actually removed.
    #[must_use = "returns the quantity actually removed, which may be less than requested"]
    pub fn remove_from_slot(&mut self, index: usize, sample: &Item, quantity: u32) -> u32 {
        let Some(slot) = self.slots.get_mut(index) else {
            return 0;
        };
        let Some(stack) = slot.as_mut() else {
            return 0;
        };
        if !stack.item.can_stack_with(sample) {
            return 0;
        }
        let removed = quantity.min(stack.quantity);
        stack.quantity -= removed;
        if stack.quantity == 0 {
            *slot = None;
        }
        removed
    }

    /// Total quantity of items matching `predicate`.
    pub fn count_matching(&self, predicate: impl Fn(&Item) -> bool) -> u32 {
        self.slots
            .iter()
            .flatten()
            .filter(|s| predicate(&s.item))
            .map(|s| s.quantity)
            .sum()
    }

    /// Total quantity of one item type.
    pub fn count_of(&self, item_type: ItemTypeId) -> u32 {
        self.count_matching(|item| item.item_type == item_type)
    }

    /// Total items across all slots.
    pub fn total(&self) -> u32 {
        self.slots.iter().flatten().map(|s| s.quantity).sum()
    }

    /// Whether every slot holds a full stack.
    pub fn is_full(&self) -> bool {
        self.slots
            .iter()
            .all(|slot| matches!(slot, Some(stack) if stack.quantity >= self.max_stack))
    }
}

// ---------------------------------------------------------------------------
// Shared inventories
// ---------------------------------------------------------------------------

/// A reference-counted inventory. Clones alias the same slots and report the
/// same [`InventoryReferenceId`].
#[derive(Debug, Clone)]
pub struct SharedInventory(Rc<RefCell<Inventory>>);

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self(Rc::new(RefCell::new(inventory)))
    }

    pub fn reference_id(&self) -> InventoryReferenceId {
        InventoryReferenceId(Rc::as_ptr(&self.0) as usize)
    }

    pub fn same_as(&self, other: &SharedInventory) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn borrow(&self) -> Result<Ref<'_, Inventory>, AutomateError> {
        self.0
            .try_borrow()
            .map_err(|_| AutomateError::InventoryBusy("inventory".into()))
    }

    pub fn borrow_mut(&self) -> Result<RefMut<'_, Inventory>, AutomateError> {
        self.0
            .try_borrow_mut()
            .map_err(|_| AutomateError::InventoryBusy("inventory".into()))
    }

    /// A stack source over one slot of this inventory.
    pub fn slot_source(&self, slot: usize) -> InventorySlotSource {
        InventorySlotSource {
            inventory: self.clone(),
            slot,
        }
    }
}

/// Backs a tracked stack with one inventory slot.
#[derive(Debug, Clone)]
pub struct InventorySlotSource {
    inventory: SharedInventory,
    slot: usize,
}

impl StackSource for InventorySlotSource {
    fn remove(&self, sample: &Item, quantity: u32) -> Result<u32, AutomateError> {
        let mut inventory = self.inventory.borrow_mut()?;
        Ok(inventory.remove_from_slot(self.slot, sample, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coal() -> Item {
        Item::new(ItemTypeId(382), "Coal", ItemCategory::BuildingResource, 15)
    }

    fn blueberry() -> Item {
        Item::new(ItemTypeId(258), "Blueberry", ItemCategory::Fruit, 50)
    }

    #[test]
    fn stacking_compares_by_value() {
        assert!(coal().can_stack_with(&coal()));
        assert!(!coal().can_stack_with(&blueberry()));
        assert!(!blueberry().can_stack_with(&blueberry().with_quality(Quality::Gold)));
    }

    #[test]
    fn preserves_discriminate_stacking() {
        let wine = Item::new(ItemTypeId(348), "Wine", ItemCategory::ArtisanGoods, 150);
        let blueberry_wine = wine.clone().with_preserve(PreserveKind::Wine, ItemTypeId(258));
        let melon_wine = wine.with_preserve(PreserveKind::Wine, ItemTypeId(254));
        assert!(!blueberry_wine.can_stack_with(&melon_wine));
        assert!(blueberry_wine.can_stack_with(&blueberry_wine.clone()));
    }

    #[test]
    fn add_tops_up_then_fills_empty_slots() {
        let mut inv = Inventory::with_max_stack(3, 10);
        assert_eq!(inv.add(&coal(), 4), 0);
        assert_eq!(inv.add(&coal(), 8), 0);
        assert_eq!(inv.slot(0).map(|s| s.quantity), Some(10));
        assert_eq!(inv.slot(1).map(|s| s.quantity), Some(2));
        assert!(inv.slot(2).is_none());
        assert_eq!(inv.total(), 12);
    }

    #[test]
    fn add_reports_overflow() {
        let mut inv = Inventory::with_max_stack(1, 5);
        assert_eq!(inv.add(&coal(), 8), 3);
        assert_eq!(inv.add(&blueberry(), 1), 1);
        assert!(inv.is_full());
    }

    #[test]
    fn space_for_counts_partial_and_empty_slots() {
        let mut inv = Inventory::with_max_stack(3, 10);
        let _ = inv.add(&coal(), 4);
        let _ = inv.add(&blueberry(), 10);
        assert_eq!(inv.space_for(&coal()), 6 + 10);
        assert_eq!(inv.space_for(&blueberry()), 10);
    }

    #[test]
    fn remove_from_slot_clears_emptied_slot() {
        let mut inv = Inventory::new(2);
        let _ = inv.add(&coal(), 5);
        assert_eq!(inv.remove_from_slot(0, &coal(), 3), 3);
        assert_eq!(inv.remove_from_slot(0, &coal(), 9), 2);
        assert!(inv.slot(0).is_none());
        assert_eq!(inv.remove_from_slot(0, &coal(), 1), 0);
    }

    #[test]
    fn remove_from_slot_ignores_different_item() {
        let mut inv = Inventory::new(1);
        let _ = inv.add(&coal(), 5);
        assert_eq!(inv.remove_from_slot(0, &blueberry(), 3), 0);
        assert_eq!(inv.count_of(ItemTypeId(382)), 5);
    }

    #[test]
    fn shared_inventory_clones_alias() {
        let a = SharedInventory::new(Inventory::new(4));
        let b = a.clone();
        let c = SharedInventory::new(Inventory::new(4));
        assert_eq!(a.reference_id(), b.reference_id());
        assert_ne!(a.reference_id(), c.reference_id());
        assert!(a.same_as(&b));

        let _ = a.borrow_mut().unwrap().add(&coal(), 3);
        assert_eq!(b.borrow().unwrap().count_of(ItemTypeId(382)), 3);
    }

    #[test]
    fn shared_inventory_reports_busy() {
        let a = SharedInventory::new(Inventory::new(1));
        let _guard = a.borrow_mut().unwrap();
        assert!(matches!(a.borrow(), Err(AutomateError::InventoryBusy(_))));
    }

    #[test]
    fn slot_source_removes_from_backing_inventory() {
        let inv = SharedInventory::new(Inventory::new(2));
        let _ = inv.borrow_mut().unwrap().add(&coal(), 5);
        let source = inv.slot_source(0);
        assert_eq!(source.remove(&coal(), 2).unwrap(), 2);
        assert_eq!(inv.borrow().unwrap().total(), 3);
    }
}
