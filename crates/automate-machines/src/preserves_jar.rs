//! Preserves jar: fruit into jelly, vegetables into pickles.

use crate::catalog::{JELLY, PICKLES};
use crate::generic::{ObjectMachine, RecipeMachine, artisan_good};
use automate_core::fixed::Fixed64;
use automate_core::item::{ItemCategory, ItemStack, PreserveKind};
use automate_core::recipe::Recipe;

pub const MACHINE_TYPE: &str = "Preserves Jar";

const MINUTES: u32 = 4000;

pub fn recipes() -> Vec<Recipe> {
    let double = Fixed64::from_num(2);
    vec![
        Recipe::new(
            "Jelly",
            |item| item.category == ItemCategory::Fruit,
            1,
            move |fruit| {
                ItemStack::new(artisan_good(JELLY, "Jelly", PreserveKind::Jelly, fruit, double, 50), 1)
            },
            MINUTES,
        ),
        Recipe::new(
            "Pickles",
            |item| item.category == ItemCategory::Vegetable,
            1,
            move |vegetable| {
                ItemStack::new(
                    artisan_good(PICKLES, "Pickles", PreserveKind::Pickles, vegetable, double, 50),
                    1,
                )
            },
            MINUTES,
        ),
    ]
}

pub fn preserves_jar(object: ObjectMachine) -> RecipeMachine {
    RecipeMachine::new(object, recipes())
}
