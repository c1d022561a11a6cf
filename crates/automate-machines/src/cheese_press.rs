//! Cheese press: milk into cheese; large milk gives gold-quality cheese.

use crate::catalog::{self, CHEESE, GOAT_CHEESE, GOAT_MILK, LARGE_GOAT_MILK, LARGE_MILK, MILK};
use crate::generic::{ObjectMachine, RecipeMachine};
use automate_core::id::ItemTypeId;
use automate_core::item::{ItemStack, Quality};
use automate_core::recipe::Recipe;

pub const MACHINE_TYPE: &str = "Cheese Press";

const MINUTES: u32 = 200;

fn press(name: &str, input: ItemTypeId, output: ItemTypeId, quality: Quality) -> Recipe {
    Recipe::new(
        name,
        move |item| item.item_type == input,
        1,
        move |_| ItemStack::new(catalog::item(output).with_quality(quality), 1),
        MINUTES,
    )
}

pub fn recipes() -> Vec<Recipe> {
    vec![
        press("Cheese", MILK, CHEESE, Quality::Normal),
        press("Cheese (large)", LARGE_MILK, CHEESE, Quality::Gold),
        press("Goat Cheese", GOAT_MILK, GOAT_CHEESE, Quality::Normal),
        press("Goat Cheese (large)", LARGE_GOAT_MILK, GOAT_CHEESE, Quality::Gold),
    ]
}

pub fn cheese_press(object: ObjectMachine) -> RecipeMachine {
    RecipeMachine::new(object, recipes())
}
