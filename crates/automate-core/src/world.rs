//! Host-world objects the engine reads and triggers.
//!
//! These model what the host simulation owns: the clock, machine objects
//! with their ready timers, chests, and farm-wide counters. The engine never
//! advances time itself; the host calls [`ProcessingObject::advance_minutes`].

use crate::container::ChestOptions;
use crate::error::AutomateError;
use crate::item::{Inventory, Item, ItemStack, SharedInventory};
use crate::rng::SimRng;
use crate::tile::TilePosition;
use crate::tracked::{StackSource, TrackedStack};
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Fall,
    Winter,
}

/// The host world's calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldClock {
    pub days_played: u32,
    /// Time of day in `HHMM` form, from 600 to 2600.
    pub time_of_day: u32,
    pub season: Season,
}

impl Default for WorldClock {
    fn default() -> Self {
        Self {
            days_played: 1,
            time_of_day: 600,
            season: Season::Spring,
        }
    }
}

impl WorldClock {
    pub fn new(days_played: u32, time_of_day: u32, season: Season) -> Self {
        Self {
            days_played,
            time_of_day,
            season,
        }
    }

    /// Deterministic seed for randomized output at `tile`.
    ///
    /// Depends only on the calendar and the tile, so every peer holding the
    /// same snapshot draws the same result.
    pub fn seed_for(&self, tile: TilePosition) -> u64 {
        let mut rng = SimRng::new(
            (u64::from(self.days_played) << 32)
                ^ u64::from(self.time_of_day)
                ^ ((tile.x as u32 as u64) << 16)
                ^ ((tile.y as u32 as u64) << 48),
        );
        rng.next_u64()
    }

    /// In-game minutes from now until 6am, `days` mornings from now.
    pub fn minutes_until_morning(&self, days: u32) -> u32 {
        let to_minutes = |hhmm: u32| (hhmm / 100) * 60 + hhmm % 100;
        let until_two_am = to_minutes(2600).saturating_sub(to_minutes(self.time_of_day));
        until_two_am + 4 * 60 + days.saturating_sub(1) * 24 * 60
    }
}

// ---------------------------------------------------------------------------
// Processing objects
// ---------------------------------------------------------------------------

/// A placed machine object: what it holds and when it will be ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingObject {
    pub name: String,
    /// Output being produced, or ready for collection.
    pub held: Option<ItemStack>,
    /// The last input consumed, for machines that restart on the same input.
    pub last_input: Option<Item>,
    pub minutes_until_ready: u32,
    pub ready_for_harvest: bool,
}

impl ProcessingObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            held: None,
            last_input: None,
            minutes_until_ready: 0,
            ready_for_harvest: false,
        }
    }

    /// Start producing `output`, ready after `minutes`.
    pub fn start(&mut self, input: Option<Item>, output: ItemStack, minutes: u32) {
        if input.is_some() {
            self.last_input = input;
        }
        self.held = Some(output);
        self.minutes_until_ready = minutes;
        self.ready_for_harvest = minutes == 0;
    }

    /// Advance the ready timer. Owned by the host world.
    pub fn advance_minutes(&mut self, minutes: u32) {
        if self.held.is_none() || self.ready_for_harvest {
            return;
        }
        self.minutes_until_ready = self.minutes_until_ready.saturating_sub(minutes);
        if self.minutes_until_ready == 0 {
            self.ready_for_harvest = true;
        }
    }

    /// Drop any held output and timers.
    pub fn clear(&mut self) {
        self.held = None;
        self.minutes_until_ready = 0;
        self.ready_for_harvest = false;
    }
}

/// Shared handle to a placed [`ProcessingObject`].
#[derive(Debug, Clone)]
pub struct ObjectHandle(Rc<RefCell<ProcessingObject>>);

impl ObjectHandle {
    pub fn new(object: ProcessingObject) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    pub fn borrow(&self) -> Result<Ref<'_, ProcessingObject>, AutomateError> {
        self.0
            .try_borrow()
            .map_err(|_| AutomateError::InventoryBusy("machine object".into()))
    }

    pub fn borrow_mut(&self) -> Result<RefMut<'_, ProcessingObject>, AutomateError> {
        self.0
            .try_borrow_mut()
            .map_err(|_| AutomateError::InventoryBusy("machine object".into()))
    }

    /// A tracked stack over the object's held output, if any.
    pub fn held_output(&self) -> Result<Option<TrackedStack>, AutomateError> {
        let held = self.borrow()?.held.clone();
        held.as_ref()
            .map(|stack| TrackedStack::new(HeldOutputSource(self.clone()), Some(stack)))
            .transpose()
    }
}

/// Backs a tracked stack with a machine object's held output.
#[derive(Debug, Clone)]
pub struct HeldOutputSource(ObjectHandle);

impl StackSource for HeldOutputSource {
    fn remove(&self, sample: &Item, quantity: u32) -> Result<u32, AutomateError> {
        let mut object = self.0.borrow_mut()?;
        let Some(held) = object.held.as_mut() else {
            return Ok(0);
        };
        if !held.item.can_stack_with(sample) {
            return Ok(0);
        }
        let removed = quantity.min(held.quantity);
        held.quantity -= removed;
        if held.quantity == 0 {
            object.held = None;
        }
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Farm counters
// ---------------------------------------------------------------------------

/// Farm-wide resource counters machines may drain or fill.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmCounters {
    /// Hay stored in silos.
    pub hay: u32,
    /// Total silo capacity.
    pub silo_capacity: u32,
}

impl FarmCounters {
    pub fn hay_space(&self) -> u32 {
        self.silo_capacity.saturating_sub(self.hay)
    }
}

/// Shared handle to the farm's [`FarmCounters`].
#[derive(Debug, Clone, Default)]
pub struct FarmHandle(Rc<RefCell<FarmCounters>>);

impl FarmHandle {
    pub fn new(counters: FarmCounters) -> Self {
        Self(Rc::new(RefCell::new(counters)))
    }

    pub fn borrow(&self) -> Result<Ref<'_, FarmCounters>, AutomateError> {
        self.0
            .try_borrow()
            .map_err(|_| AutomateError::InventoryBusy("farm counters".into()))
    }

    pub fn borrow_mut(&self) -> Result<RefMut<'_, FarmCounters>, AutomateError> {
        self.0
            .try_borrow_mut()
            .map_err(|_| AutomateError::InventoryBusy("farm counters".into()))
    }
}

// ---------------------------------------------------------------------------
// Chests
// ---------------------------------------------------------------------------

/// A placed chest. Linked chests share their source's inventory.
#[derive(Debug, Clone)]
pub struct ChestEntity {
    pub inventory: SharedInventory,
    pub options: ChestOptions,
}

impl ChestEntity {
    pub fn new(slots: usize) -> Self {
        Self {
            inventory: SharedInventory::new(Inventory::new(slots)),
            options: ChestOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChestOptions) -> Self {
        self.options = options;
        self
    }

    /// Another chest sharing this chest's inventory.
    pub fn linked(&self) -> Self {
        Self {
            inventory: self.inventory.clone(),
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemTypeId;
    use crate::item::ItemCategory;
    use crate::tracked::Tracked;

    fn honey() -> Item {
        Item::new(ItemTypeId(340), "Wild Honey", ItemCategory::ArtisanGoods, 100)
    }

    #[test]
    fn seeds_are_deterministic_per_snapshot() {
        let clock = WorldClock::new(12, 1300, Season::Summer);
        let tile = TilePosition::new(4, 9);
        assert_eq!(clock.seed_for(tile), clock.seed_for(tile));
        assert_ne!(clock.seed_for(tile), clock.seed_for(TilePosition::new(5, 9)));

        let later = WorldClock::new(12, 1310, Season::Summer);
        assert_ne!(clock.seed_for(tile), later.seed_for(tile));
    }

    #[test]
    fn minutes_until_morning() {
        let clock = WorldClock::new(1, 600, Season::Spring);
        // 6am to 2am is 20 hours, then 4 more hours to 6am.
        assert_eq!(clock.minutes_until_morning(1), 24 * 60);
        assert_eq!(clock.minutes_until_morning(4), 4 * 24 * 60);

        let evening = WorldClock::new(1, 2200, Season::Spring);
        assert_eq!(evening.minutes_until_morning(1), 8 * 60);
    }

    #[test]
    fn object_timer_is_advanced_by_host() {
        let mut object = ProcessingObject::new("Keg");
        object.start(None, ItemStack::new(honey(), 1), 90);
        assert!(!object.ready_for_harvest);
        object.advance_minutes(60);
        assert_eq!(object.minutes_until_ready, 30);
        object.advance_minutes(60);
        assert!(object.ready_for_harvest);
    }

    #[test]
    fn advancing_empty_object_is_noop() {
        let mut object = ProcessingObject::new("Keg");
        object.advance_minutes(60);
        assert!(!object.ready_for_harvest);
    }

    #[test]
    fn start_remembers_last_input() {
        let mut object = ProcessingObject::new("Crystalarium");
        object.start(Some(honey()), ItemStack::new(honey(), 1), 10);
        object.start(None, ItemStack::new(honey(), 1), 10);
        assert_eq!(object.last_input, Some(honey()));
    }

    #[test]
    fn held_output_removal_clears_object() {
        let handle = ObjectHandle::new(ProcessingObject::new("Bee House"));
        handle
            .borrow_mut()
            .unwrap()
            .start(None, ItemStack::new(honey(), 2), 0);

        let mut stack = handle.held_output().unwrap().unwrap();
        assert_eq!(stack.reduce(1).unwrap(), 1);
        assert_eq!(handle.borrow().unwrap().held.as_ref().unwrap().quantity, 1);
        stack.reduce(1).unwrap();
        assert!(handle.borrow().unwrap().held.is_none());
    }

    #[test]
    fn held_output_none_when_empty() {
        let handle = ObjectHandle::new(ProcessingObject::new("Keg"));
        assert!(handle.held_output().unwrap().is_none());
    }

    #[test]
    fn farm_hay_space() {
        let farm = FarmHandle::new(FarmCounters {
            hay: 180,
            silo_capacity: 240,
        });
        assert_eq!(farm.borrow().unwrap().hay_space(), 60);
    }

    #[test]
    fn linked_chest_shares_inventory() {
        let chest = ChestEntity::new(12);
        let linked = chest.linked();
        assert!(chest.inventory.same_as(&linked.inventory));
    }
}
