//! Shared test helpers for unit tests, integration tests, and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::container::{ChestContainer, ChestOptions, Container};
use crate::id::{ItemTypeId, LocationId};
use crate::item::{Inventory, Item, ItemCategory, ItemStack, SharedInventory};
use crate::tile::{TileArea, TilePosition};
use crate::tracked::TrackedStack;
use std::rc::Rc;

// ===========================================================================
// Items
// ===========================================================================

pub fn coal() -> Item {
    Item::new(ItemTypeId(382), "Coal", ItemCategory::BuildingResource, 15)
}

pub fn iron_ore() -> Item {
    Item::new(ItemTypeId(380), "Iron Ore", ItemCategory::Metal, 10)
}

pub fn copper_ore() -> Item {
    Item::new(ItemTypeId(378), "Copper Ore", ItemCategory::Metal, 5)
}

pub fn wood() -> Item {
    Item::new(ItemTypeId(388), "Wood", ItemCategory::BuildingResource, 2)
}

pub fn blueberry() -> Item {
    Item::new(ItemTypeId(258), "Blueberry", ItemCategory::Fruit, 50)
}

/// `quantity` of `item` as a stack.
pub fn stack(item: Item, quantity: u32) -> ItemStack {
    ItemStack::new(item, quantity)
}

/// A tracked stack with no backing entity.
pub fn detached(item: Item, quantity: u32) -> TrackedStack {
    match TrackedStack::detached(&ItemStack::new(item, quantity)) {
        Ok(stack) => stack,
        Err(e) => panic!("test stack must be non-empty: {e}"),
    }
}

// ===========================================================================
// Inventories and containers
// ===========================================================================

/// A shared inventory with `slots` slots holding `items`. Panics if the
/// items don't fit.
pub fn filled_inventory(slots: usize, items: &[(Item, u32)]) -> SharedInventory {
    let mut inventory = Inventory::new(slots);
    for (item, quantity) in items {
        let overflow = inventory.add(item, *quantity);
        assert_eq!(overflow, 0, "test inventory overflowed");
    }
    SharedInventory::new(inventory)
}

/// A read/write chest container in `Farm` at `tile`.
pub fn chest_container(
    name: &str,
    tile: TilePosition,
    inventory: SharedInventory,
) -> Rc<dyn Container> {
    chest_container_with(name, tile, inventory, ChestOptions::default())
}

pub fn chest_container_with(
    name: &str,
    tile: TilePosition,
    inventory: SharedInventory,
    options: ChestOptions,
) -> Rc<dyn Container> {
    Rc::new(ChestContainer::new(
        name,
        LocationId::new("Farm"),
        TileArea::single(tile),
        inventory,
        options,
    ))
}
