//! The container abstraction.
//!
//! Chests, linked chests, auto-grabber hoppers and building output bins all
//! look the same to a network: a named inventory at some tiles that may allow
//! taking items, storing items, or both.

use crate::error::AutomateError;
use crate::id::{InventoryReferenceId, LocationId};
use crate::item::{Item, SharedInventory};
use crate::tile::TileArea;
use crate::tracked::{Tracked, TrackedStack};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// An entity exposing an inventory of item stacks to a network.
pub trait Container {
    fn name(&self) -> &str;

    fn location(&self) -> &LocationId;

    fn area(&self) -> TileArea;

    /// Identity of the underlying inventory. Containers sharing one are
    /// enumerated once per network.
    fn inventory_ref(&self) -> InventoryReferenceId;

    /// Whether machines may take ingredients from this container.
    fn can_take(&self) -> bool;

    /// Whether machines may push output into this container.
    fn can_store(&self) -> bool;

    /// Number of slots in the underlying inventory.
    fn slot_capacity(&self) -> usize;

    /// Tracked stacks over every non-empty slot, in slot order.
    fn stacks(&self) -> Result<Vec<TrackedStack>, AutomateError>;

    /// How many of `item` would fit.
    fn space_for(&self, item: &Item) -> Result<u32, AutomateError>;

    /// Move as much of `stack` as fits into this container, reducing `stack`
    /// by the amount accepted. Returns the amount accepted.
    fn store(&self, stack: &mut dyn Tracked) -> Result<u32, AutomateError>;
}

// ---------------------------------------------------------------------------
// Chest containers
// ---------------------------------------------------------------------------

/// Per-chest automation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChestOptions {
    /// Machines may take items out of this chest.
    pub take_items: bool,
    /// Machines may put items into this chest.
    pub store_items: bool,
}

impl Default for ChestOptions {
    fn default() -> Self {
        Self {
            take_items: true,
            store_items: true,
        }
    }
}

impl ChestOptions {
    /// Output-only: a bin machines fill but never take from.
    pub fn output_only() -> Self {
        Self {
            take_items: false,
            store_items: true,
        }
    }

    /// Input-only: a chest machines draw from but never fill.
    pub fn input_only() -> Self {
        Self {
            take_items: true,
            store_items: false,
        }
    }
}

/// A container backed by a [`SharedInventory`].
#[derive(Debug, Clone)]
pub struct ChestContainer {
    name: String,
    location: LocationId,
    area: TileArea,
    inventory: SharedInventory,
    options: ChestOptions,
}

impl ChestContainer {
    pub fn new(
        name: impl Into<String>,
        location: LocationId,
        area: TileArea,
        inventory: SharedInventory,
        options: ChestOptions,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            area,
            inventory,
            options,
        }
    }

    pub fn inventory(&self) -> &SharedInventory {
        &self.inventory
    }

    pub fn options(&self) -> ChestOptions {
        self.options
    }
}

impl Container for ChestContainer {
    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> &LocationId {
        &self.location
    }

    fn area(&self) -> TileArea {
        self.area
    }

    fn inventory_ref(&self) -> InventoryReferenceId {
        self.inventory.reference_id()
    }

    fn can_take(&self) -> bool {
        self.options.take_items
    }

    fn can_store(&self) -> bool {
        self.options.store_items
    }

    fn slot_capacity(&self) -> usize {
        self.inventory.borrow().map(|inv| inv.capacity()).unwrap_or(0)
    }

    fn stacks(&self) -> Result<Vec<TrackedStack>, AutomateError> {
        let inventory = self.inventory.borrow()?;
        let stacks = inventory
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, slot)| TrackedStack::new(self.inventory.slot_source(index), slot.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(stacks)
    }

    fn space_for(&self, item: &Item) -> Result<u32, AutomateError> {
        Ok(self.inventory.borrow()?.space_for(item))
    }

    fn store(&self, stack: &mut dyn Tracked) -> Result<u32, AutomateError> {
        let Some(sample) = stack.sample().cloned() else {
            return Ok(0);
        };
        let amount = stack.count().min(self.space_for(&sample)?);
        if amount == 0 {
            return Ok(0);
        }

        let Some(taken) = stack.take(amount)? else {
            return Ok(0);
        };
        let overflow = self
            .inventory
            .borrow_mut()?
            .add(&taken.item, taken.quantity);
        if overflow > 0 {
            return Err(AutomateError::invalid_state(format!(
                "{} lost {overflow} {} after reporting free space",
                self.name, taken.item.name
            )));
        }
        Ok(taken.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemTypeId;
    use crate::item::{Inventory, ItemCategory, ItemStack};
    use crate::tile::TilePosition;

    fn coal() -> Item {
        Item::new(ItemTypeId(382), "Coal", ItemCategory::BuildingResource, 15)
    }

    fn chest(inventory: SharedInventory, options: ChestOptions) -> ChestContainer {
        ChestContainer::new(
            "Chest",
            LocationId::new("Farm"),
            TileArea::single(TilePosition::new(0, 0)),
            inventory,
            options,
        )
    }

    #[test]
    fn stacks_skip_empty_slots() {
        let inv = SharedInventory::new(Inventory::new(4));
        {
            let mut guard = inv.borrow_mut().unwrap();
            let _ = guard.add(&coal(), 3);
        }
        let container = chest(inv, ChestOptions::default());
        let stacks = container.stacks().unwrap();
        assert_eq!(stacks.len(), 1);
        assert_eq!(stacks[0].count(), 3);
        assert_eq!(container.slot_capacity(), 4);
    }

    #[test]
    fn store_accepts_what_fits() {
        let inv = SharedInventory::new(Inventory::with_max_stack(1, 5));
        let container = chest(inv.clone(), ChestOptions::default());
        let mut output = TrackedStack::detached(&ItemStack::new(coal(), 8)).unwrap();

        assert_eq!(container.store(&mut output).unwrap(), 5);
        assert_eq!(output.count(), 3);
        assert_eq!(inv.borrow().unwrap().total(), 5);

        assert_eq!(container.store(&mut output).unwrap(), 0);
        assert_eq!(output.count(), 3);
    }

    #[test]
    fn options_control_direction() {
        let inv = SharedInventory::new(Inventory::new(1));
        let bin = chest(inv.clone(), ChestOptions::output_only());
        assert!(!bin.can_take());
        assert!(bin.can_store());

        let input = chest(inv, ChestOptions::input_only());
        assert!(input.can_take());
        assert!(!input.can_store());
    }

    #[test]
    fn linked_chests_share_reference() {
        let inv = SharedInventory::new(Inventory::new(1));
        let a = chest(inv.clone(), ChestOptions::default());
        let b = chest(inv, ChestOptions::default());
        assert_eq!(a.inventory_ref(), b.inventory_ref());
    }
}
