//! Furnace: one coal plus ore or quartz, smelted into bars.

use crate::catalog::*;
use crate::generic::{ObjectMachine, RecipeMachine, fixed_recipe};
use automate_core::recipe::Recipe;

pub const MACHINE_TYPE: &str = "Furnace";

/// Smelting recipes, highest priority first.
pub fn recipes() -> Vec<Recipe> {
    vec![
        fixed_recipe("Copper Bar", COPPER_ORE, 5, COPPER_BAR, 1, 30),
        fixed_recipe("Iron Bar", IRON_ORE, 5, IRON_BAR, 1, 120),
        fixed_recipe("Gold Bar", GOLD_ORE, 5, GOLD_BAR, 1, 300),
        fixed_recipe("Iridium Bar", IRIDIUM_ORE, 5, IRIDIUM_BAR, 1, 480),
        fixed_recipe("Refined Quartz", QUARTZ, 1, REFINED_QUARTZ, 1, 90),
        fixed_recipe("Refined Quartz (fire)", FIRE_QUARTZ, 1, REFINED_QUARTZ, 3, 90),
    ]
}

pub fn furnace(object: ObjectMachine) -> RecipeMachine {
    RecipeMachine::new(object, recipes()).with_fuel(COAL, 1)
}
