//! Bee house: produces honey on its own, except in winter.

use crate::catalog::{self, HONEY};
use crate::generic::ObjectMachine;
use automate_core::error::AutomateError;
use automate_core::id::LocationId;
use automate_core::item::ItemStack;
use automate_core::machine::{Machine, MachineState};
use automate_core::storage::Storage;
use automate_core::tile::TileArea;
use automate_core::tracked::TrackedStack;
use automate_core::world::{Season, WorldClock};

pub const MACHINE_TYPE: &str = "Bee House";

/// Mornings until the next honey is ready.
const DAYS: u32 = 4;

#[derive(Debug)]
pub struct BeeHouse {
    object: ObjectMachine,
}

impl BeeHouse {
    pub fn new(object: ObjectMachine) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &ObjectMachine {
        &self.object
    }
}

impl Machine for BeeHouse {
    fn machine_type(&self) -> &str {
        self.object.machine_type()
    }

    fn location(&self) -> &LocationId {
        self.object.location()
    }

    fn area(&self) -> TileArea {
        self.object.area()
    }

    fn state(&self, clock: &WorldClock) -> Result<MachineState, AutomateError> {
        if clock.season == Season::Winter {
            return Ok(MachineState::Disabled);
        }
        self.object.object_state()
    }

    fn output(&mut self) -> Result<Option<TrackedStack>, AutomateError> {
        self.object.ready_output()
    }

    fn on_output_taken(&mut self, clock: &WorldClock) -> Result<(), AutomateError> {
        self.object.start(
            None,
            ItemStack::new(catalog::item(HONEY), 1),
            clock.minutes_until_morning(DAYS),
        )
    }

    fn set_input(&mut self, _storage: &Storage, _clock: &WorldClock) -> Result<bool, AutomateError> {
        Ok(false)
    }
}
