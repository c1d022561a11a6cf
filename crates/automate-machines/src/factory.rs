//! Maps placed processing objects to the machine that automates them.

use crate::bee_house::{self, BeeHouse};
use crate::crystalarium::{self, Crystalarium};
use crate::feed_hopper::{self, FeedHopper};
use crate::generic::ObjectMachine;
use crate::recycling::{self, RecyclingMachine};
use crate::{cheese_press, furnace, keg, preserves_jar};
use automate_spatial::{
    Automatable, AutomationFactory, ChestFactory, HookId, HookPriority, HookRegistry, Location,
    TileEntity, World, WorldEntity,
};

/// Every machine type this crate knows how to automate.
pub const MACHINE_TYPES: [&str; 8] = [
    furnace::MACHINE_TYPE,
    keg::MACHINE_TYPE,
    preserves_jar::MACHINE_TYPE,
    cheese_press::MACHINE_TYPE,
    recycling::MACHINE_TYPE,
    crystalarium::MACHINE_TYPE,
    bee_house::MACHINE_TYPE,
    feed_hopper::MACHINE_TYPE,
];

/// Recognizes processing objects by name.
#[derive(Debug, Default)]
pub struct MachineFactory;

impl AutomationFactory for MachineFactory {
    fn name(&self) -> &str {
        "machines"
    }

    fn automatable_for(
        &self,
        world: &World,
        location: &Location,
        entity: TileEntity<'_>,
    ) -> Option<Automatable> {
        let TileEntity::Object { object, .. } = entity else {
            return None;
        };
        let WorldEntity::Machine(handle) = &object.entity else {
            return None;
        };
        let area = object.area;
        let name = object.name.as_str();
        if name == feed_hopper::MACHINE_TYPE {
            let hopper = FeedHopper::new(location.id().clone(), area, world.farm.clone());
            return Some(Automatable::machine(area, hopper));
        }

        let base = ObjectMachine::new(name, location.id().clone(), area, handle.clone());
        let found = match name {
            furnace::MACHINE_TYPE => Automatable::machine(area, furnace::furnace(base)),
            keg::MACHINE_TYPE => Automatable::machine(area, keg::keg(base)),
            preserves_jar::MACHINE_TYPE => {
                Automatable::machine(area, preserves_jar::preserves_jar(base))
            }
            cheese_press::MACHINE_TYPE => {
                Automatable::machine(area, cheese_press::cheese_press(base))
            }
            recycling::MACHINE_TYPE => Automatable::machine(area, RecyclingMachine::new(base)),
            crystalarium::MACHINE_TYPE => Automatable::machine(area, Crystalarium::new(base)),
            bee_house::MACHINE_TYPE => Automatable::machine(area, BeeHouse::new(base)),
            _ => return None,
        };
        Some(found)
    }
}

/// Registers chests and the built-in machines at normal priority.
pub fn register_standard(registry: &HookRegistry) -> [HookId; 2] {
    [
        registry.register_factory(HookPriority::Normal, ChestFactory),
        registry.register_factory(HookPriority::Normal, MachineFactory),
    ]
}
