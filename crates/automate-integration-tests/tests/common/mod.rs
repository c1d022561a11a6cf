//! World-building helpers shared by the scenario tests.

#![allow(dead_code)]

use automate_core::id::LocationId;
use automate_core::item::Item;
use automate_core::tile::{TileArea, TilePosition};
use automate_core::world::{ChestEntity, ObjectHandle, ProcessingObject};
use automate_engine::{AutomateConfig, AutomationEngine};
use automate_spatial::{HookRegistry, Location, WorldEntity};
use std::sync::Arc;

pub fn farm() -> LocationId {
    LocationId::new("Farm")
}

/// An engine with chests and the built-in machines registered.
pub fn standard_engine(config: AutomateConfig) -> AutomationEngine {
    let registry = Arc::new(HookRegistry::new());
    automate_machines::register_standard(&registry);
    AutomationEngine::new(config, registry)
}

pub fn chest_with(slots: usize, items: &[(Item, u32)]) -> ChestEntity {
    let chest = ChestEntity::new(slots);
    {
        let mut inventory = chest.inventory.borrow_mut().unwrap();
        for (item, quantity) in items {
            assert_eq!(inventory.add(item, *quantity), 0, "chest overflowed");
        }
    }
    chest
}

pub fn place_chest(location: &mut Location, x: i32, y: i32, chest: &ChestEntity) {
    location
        .place("Chest", TileArea::single(TilePosition::new(x, y)), WorldEntity::Chest(chest.clone()))
        .unwrap();
}

/// Place a processing object named `name` and return its handle.
pub fn place_machine(location: &mut Location, name: &str, x: i32, y: i32) -> ObjectHandle {
    let handle = ObjectHandle::new(ProcessingObject::new(name));
    location
        .place(name, TileArea::single(TilePosition::new(x, y)), WorldEntity::Machine(handle.clone()))
        .unwrap();
    handle
}

pub fn place_decoration(location: &mut Location, name: &str, x: i32, y: i32) {
    location
        .place(name, TileArea::single(TilePosition::new(x, y)), WorldEntity::Decoration)
        .unwrap();
}
