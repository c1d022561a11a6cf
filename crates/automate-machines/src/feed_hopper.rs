//! Feed hopper: moves hay from the network into the farm's silos.
//!
//! It has no output stage and never processes; it drains storage into a
//! world counter and is disabled while the silos are full.

use crate::catalog::HAY;
use automate_core::error::AutomateError;
use automate_core::id::LocationId;
use automate_core::item::Item;
use automate_core::machine::{Machine, MachineState};
use automate_core::storage::Storage;
use automate_core::tile::TileArea;
use automate_core::tracked::TrackedStack;
use automate_core::world::{FarmHandle, WorldClock};
use tracing::trace;

pub const MACHINE_TYPE: &str = "Feed Hopper";

#[derive(Debug)]
pub struct FeedHopper {
    location: LocationId,
    area: TileArea,
    farm: FarmHandle,
}

impl FeedHopper {
    pub fn new(location: LocationId, area: TileArea, farm: FarmHandle) -> Self {
        Self {
            location,
            area,
            farm,
        }
    }
}

impl Machine for FeedHopper {
    fn machine_type(&self) -> &str {
        MACHINE_TYPE
    }

    fn location(&self) -> &LocationId {
        &self.location
    }

    fn area(&self) -> TileArea {
        self.area
    }

    fn state(&self, _clock: &WorldClock) -> Result<MachineState, AutomateError> {
        if self.farm.borrow()?.hay_space() == 0 {
            return Ok(MachineState::Disabled);
        }
        Ok(MachineState::Empty)
    }

    fn output(&mut self) -> Result<Option<TrackedStack>, AutomateError> {
        Ok(None)
    }

    fn on_output_taken(&mut self, _clock: &WorldClock) -> Result<(), AutomateError> {
        Ok(())
    }

    fn set_input(&mut self, storage: &Storage, _clock: &WorldClock) -> Result<bool, AutomateError> {
        let space = self.farm.borrow()?.hay_space();
        let Some(sample) = first_hay(storage)? else {
            return Ok(false);
        };
        // One reservation only gathers hay that stacks with the first match.
        let matches = |item: &Item| item.item_type == HAY && item.can_stack_with(&sample);
        let amount = space.min(storage.count_matching(matches)?);
        if amount == 0 || !storage.try_consume(matches, amount)? {
            return Ok(false);
        }
        self.farm.borrow_mut()?.hay += amount;
        trace!(location = %self.location, amount, "moved hay into silos");
        Ok(true)
    }
}

fn first_hay(storage: &Storage) -> Result<Option<Item>, AutomateError> {
    for stack in storage.items() {
        let stack = stack?;
        if stack.item().item_type == HAY {
            return Ok(Some(stack.item().clone()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::generic::testing::storage_with;
    use automate_core::tile::TilePosition;
    use automate_core::item::Quality;
    use automate_core::world::FarmCounters;

    fn hopper(hay: u32, silo_capacity: u32) -> (FeedHopper, FarmHandle) {
        let farm = FarmHandle::new(FarmCounters { hay, silo_capacity });
        let hopper = FeedHopper::new(
            LocationId::new("Farm"),
            TileArea::single(TilePosition::new(1, 0)),
            farm.clone(),
        );
        (hopper, farm)
    }

    #[test]
    fn fills_silo_up_to_capacity() {
        let (mut hopper, farm) = hopper(230, 240);
        let (storage, inventory) = storage_with(&[(catalog::item(HAY), 25)]);
        let clock = WorldClock::default();

        assert_eq!(hopper.state(&clock).unwrap(), MachineState::Empty);
        assert!(hopper.set_input(&storage, &clock).unwrap());
        assert_eq!(farm.borrow().unwrap().hay, 240);
        assert_eq!(inventory.borrow().unwrap().count_of(HAY), 15);
        assert_eq!(hopper.state(&clock).unwrap(), MachineState::Disabled);
    }

    #[test]
    fn mixed_quality_hay_moves_one_run_at_a_time() {
        let (mut hopper, farm) = hopper(0, 240);
        let gold = catalog::item(HAY).with_quality(Quality::Gold);
        let (storage, inventory) = storage_with(&[(gold, 5), (catalog::item(HAY), 10)]);
        let clock = WorldClock::default();

        assert!(hopper.set_input(&storage, &clock).unwrap());
        assert_eq!(farm.borrow().unwrap().hay, 5);
        assert!(hopper.set_input(&storage, &clock).unwrap());
        assert_eq!(farm.borrow().unwrap().hay, 15);
        assert_eq!(inventory.borrow().unwrap().count_of(HAY), 0);
    }

    #[test]
    fn no_hay_no_change() {
        let (mut hopper, farm) = hopper(0, 240);
        let (storage, _) = storage_with(&[]);
        assert!(!hopper.set_input(&storage, &WorldClock::default()).unwrap());
        assert_eq!(farm.borrow().unwrap().hay, 0);
        assert!(hopper.output().unwrap().is_none());
    }
}
