//! The machine contract.
//!
//! A machine is a per-type strategy over a host-world object. The engine only
//! reads its state and triggers input and output; the object's ready timer
//! belongs to the host world.
//!
//! ```text
//!   Empty --set_input ok--> Processing --timer (host)--> Done
//!     ^                                                   |
//!     +------------ output fully pushed, on_output_taken -+
//!
//!   any state --precondition fails--> Disabled --clears--> normal state
//! ```

use crate::error::AutomateError;
use crate::id::LocationId;
use crate::storage::Storage;
use crate::tile::TileArea;
use crate::tracked::TrackedStack;
use crate::world::WorldClock;
use serde::{Deserialize, Serialize};

/// Processing state of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineState {
    /// Waiting for input.
    Empty,
    /// Working; the host world will mark it done.
    Processing,
    /// Holding output ready to collect.
    Done,
    /// An external precondition (season, a full silo, an unseeded machine)
    /// prevents automation.
    Disabled,
}

/// A machine that can be automated.
pub trait Machine {
    /// Machine type name (`"Furnace"`, `"Keg"`). Used for configuration
    /// overrides and diagnostics.
    fn machine_type(&self) -> &str;

    fn location(&self) -> &LocationId;

    fn area(&self) -> TileArea;

    /// Current state. Reads only; never advances time.
    fn state(&self, clock: &WorldClock) -> Result<MachineState, AutomateError>;

    /// The ready output, if any. Reducing the returned stack removes items
    /// from the machine. Machines with no output stage return `None`.
    fn output(&mut self) -> Result<Option<TrackedStack>, AutomateError>;

    /// Called once the output returned by [`output`](Self::output) has been
    /// fully removed. Resets the machine (or restarts a passive producer).
    fn on_output_taken(&mut self, clock: &WorldClock) -> Result<(), AutomateError>;

    /// Try to start processing from `storage`. Returns whether the machine
    /// started. Machines with no input stage return `Ok(false)`.
    fn set_input(&mut self, storage: &Storage, clock: &WorldClock) -> Result<bool, AutomateError>;

    /// Build a [`AutomateError::MachineFault`] carrying this machine's context.
    fn fault(&self, reason: impl Into<String>) -> AutomateError
    where
        Self: Sized,
    {
        AutomateError::MachineFault {
            machine: self.machine_type().to_string(),
            location: self.location().clone(),
            area: self.area(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Item, ItemStack};
    use crate::tile::TilePosition;
    use crate::tracked::Tracked;

    /// A machine whose output appears after one `set_input`.
    #[derive(Debug)]
    struct Echo {
        location: LocationId,
        held: Option<ItemStack>,
    }

    impl Machine for Echo {
        fn machine_type(&self) -> &str {
            "Echo"
        }

        fn location(&self) -> &LocationId {
            &self.location
        }

        fn area(&self) -> TileArea {
            TileArea::single(TilePosition::new(2, 3))
        }

        fn state(&self, _clock: &WorldClock) -> Result<MachineState, AutomateError> {
            Ok(if self.held.is_some() {
                MachineState::Done
            } else {
                MachineState::Empty
            })
        }

        fn output(&mut self) -> Result<Option<TrackedStack>, AutomateError> {
            self.held.as_ref().map(TrackedStack::detached).transpose()
        }

        fn on_output_taken(&mut self, _clock: &WorldClock) -> Result<(), AutomateError> {
            self.held = None;
            Ok(())
        }

        fn set_input(&mut self, storage: &Storage, _clock: &WorldClock) -> Result<bool, AutomateError> {
            let Some(consumable) = storage.try_get_ingredient(|_| true, 1)? else {
                return Ok(false);
            };
            self.held = consumable.take()?;
            Ok(true)
        }
    }

    #[test]
    fn fault_carries_context() {
        let echo = Echo {
            location: LocationId::new("Shed"),
            held: None,
        };
        let err = echo.fault("jammed");
        assert_eq!(err.to_string(), "Echo at Shed (2, 3) failed: jammed");
    }

    #[test]
    fn empty_storage_does_not_start() {
        let mut echo = Echo {
            location: LocationId::new("Shed"),
            held: None,
        };
        let clock = WorldClock::default();
        assert!(!echo.set_input(&Storage::default(), &clock).unwrap());
        assert_eq!(echo.state(&clock).unwrap(), MachineState::Empty);
    }

    #[test]
    fn output_reset_cycle() {
        let mut echo = Echo {
            location: LocationId::new("Shed"),
            held: Some(ItemStack::new(
                Item::new(crate::id::ItemTypeId(1), "Thing", crate::item::ItemCategory::None, 1),
                1,
            )),
        };
        let clock = WorldClock::default();
        assert_eq!(echo.state(&clock).unwrap(), MachineState::Done);
        let stack = echo.output().unwrap().unwrap();
        assert_eq!(stack.count(), 1);
        echo.on_output_taken(&clock).unwrap();
        assert_eq!(echo.state(&clock).unwrap(), MachineState::Empty);
    }
}
