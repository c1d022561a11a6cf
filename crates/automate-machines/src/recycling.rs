//! Recycling machine: junk into randomized materials.
//!
//! The draw is seeded from the clock and the machine's tile, so the same
//! world snapshot always recycles the same way.

use crate::catalog::{self, *};
use crate::generic::ObjectMachine;
use automate_core::error::AutomateError;
use automate_core::fixed::Fixed64;
use automate_core::id::{ItemTypeId, LocationId};
use automate_core::item::ItemStack;
use automate_core::machine::{Machine, MachineState};
use automate_core::rng::SimRng;
use automate_core::storage::Storage;
use automate_core::tile::TileArea;
use automate_core::tracked::TrackedStack;
use automate_core::world::WorldClock;
use tracing::trace;

pub const MACHINE_TYPE: &str = "Recycling Machine";

const MINUTES: u32 = 60;

/// Accepted inputs, in the order they are looked for.
pub const INPUTS: [ItemTypeId; 5] = [TRASH, DRIFTWOOD, BROKEN_GLASSES, BROKEN_CD, SOGGY_NEWSPAPER];

fn percent(p: u32) -> Fixed64 {
    Fixed64::from_num(p) / Fixed64::from_num(100)
}

fn some(rng: &mut SimRng, output: ItemTypeId) -> ItemStack {
    ItemStack::new(catalog::item(output), rng.range_inclusive(1, 3))
}

/// What `input` recycles into, or `None` if it isn't junk.
pub fn recycle(input: ItemTypeId, rng: &mut SimRng) -> Option<ItemStack> {
    let output = match input {
        TRASH if rng.chance(percent(49)) => some(rng, STONE),
        TRASH if rng.chance(percent(50)) => some(rng, COAL),
        TRASH => some(rng, IRON_ORE),
        DRIFTWOOD if rng.chance(percent(50)) => some(rng, WOOD),
        DRIFTWOOD => some(rng, COAL),
        BROKEN_GLASSES | BROKEN_CD => ItemStack::new(catalog::item(REFINED_QUARTZ), 1),
        SOGGY_NEWSPAPER if rng.chance(percent(10)) => ItemStack::new(catalog::item(CLOTH), 1),
        SOGGY_NEWSPAPER => ItemStack::new(catalog::item(TORCH), 3),
        _ => return None,
    };
    Some(output)
}

#[derive(Debug)]
pub struct RecyclingMachine {
    object: ObjectMachine,
}

impl RecyclingMachine {
    pub fn new(object: ObjectMachine) -> Self {
        Self { object }
    }

    pub fn object(&self) -> &ObjectMachine {
        &self.object
    }
}

impl Machine for RecyclingMachine {
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
        self.object.object_state()
    }

    fn output(&mut self) -> Result<Option<TrackedStack>, AutomateError> {
        self.object.ready_output()
    }

    fn on_output_taken(&mut self, _clock: &WorldClock) -> Result<(), AutomateError> {
        self.object.reset()
    }

    fn set_input(&mut self, storage: &Storage, clock: &WorldClock) -> Result<bool, AutomateError> {
        for input in INPUTS {
            let Some(junk) = storage.try_get_ingredient(|item| item.item_type == input, 1)? else {
                continue;
            };
            let mut rng = SimRng::new(clock.seed_for(self.area().origin));
            let Some(output) = recycle(input, &mut rng) else {
                continue;
            };
            let sample = junk.sample().cloned();
            junk.commit()?;
            trace!(
                machine = MACHINE_TYPE,
                tile = %self.area().origin,
                output = %output.item.name,
                quantity = output.quantity,
                "recycling"
            );
            self.object.start(sample, output, MINUTES)?;
            return Ok(true);
        }
        Ok(false)
    }
}
