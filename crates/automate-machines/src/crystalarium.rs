//! Crystalarium: copies the gem it was seeded with, forever.
//!
//! It has no input stage. The player seeds it by hand; until then it is
//! disabled. Once its copy is collected it restarts on the same gem.

use crate::catalog::*;
use crate::generic::ObjectMachine;
use automate_core::error::AutomateError;
use automate_core::id::{ItemTypeId, LocationId};
use automate_core::item::{ItemStack, Quality};
use automate_core::machine::{Machine, MachineState};
use automate_core::storage::Storage;
use automate_core::tile::TileArea;
use automate_core::tracked::TrackedStack;
use automate_core::world::WorldClock;

pub const MACHINE_TYPE: &str = "Crystalarium";

/// Minutes to copy one `gem`.
pub fn minutes_for(gem: ItemTypeId) -> u32 {
    match gem {
        DIAMOND => 7500,
        EMERALD | RUBY => 3000,
        JADE => 2500,
        AQUAMARINE | AMETHYST | TOPAZ => 2000,
        FIRE_QUARTZ => 1800,
        FROZEN_TEAR | EARTH_CRYSTAL | QUARTZ => 1500,
        _ => 5000,
    }
}

#[derive(Debug)]
pub struct Crystalarium {
    object: ObjectMachine,
}

impl Crystalarium {
    pub fn new(object: ObjectMachine) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &ObjectMachine {
        &self.object
    }
}

impl Machine for Crystalarium {
    fn machine_type(&self) -> &str {
        self.object.machine_type()
    }

    fn location(&self) -> &LocationId {
        self.object.location()
    }

    fn area(&self) -> TileArea {
        self.object.area()
    }

    fn state(&self, _clock: &WorldClock) -> Result<MachineState, AutomateError> {
        let seeded = self.object.object().borrow()?.last_input.is_some();
        match self.object.object_state()? {
            MachineState::Empty if !seeded => Ok(MachineState::Disabled),
            state => Ok(state),
        }
    }

    fn output(&mut self) -> Result<Option<TrackedStack>, AutomateError> {
        self.object.ready_output()
    }

    fn on_output_taken(&mut self, _clock: &WorldClock) -> Result<(), AutomateError> {
        let last = self.object.object().borrow()?.last_input.clone();
        match last {
            Some(gem) => {
                let minutes = minutes_for(gem.item_type);
                self.object
                    .start(None, ItemStack::new(gem.with_quality(Quality::Normal), 1), minutes)
            }
            None => self.object.reset(),
        }
    }

    fn set_input(&mut self, _storage: &Storage, _clock: &WorldClock) -> Result<bool, AutomateError> {
        Ok(false)
    }
}
