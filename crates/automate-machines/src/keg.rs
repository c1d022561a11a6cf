//! Keg: brews fruit, vegetables, and a handful of specific crops.

use crate::catalog::*;
use crate::generic::{ObjectMachine, RecipeMachine, artisan_good, fixed_recipe};
use automate_core::fixed::f64_to_fixed64;
use automate_core::item::{ItemCategory, ItemStack, PreserveKind};
use automate_core::recipe::Recipe;

pub const MACHINE_TYPE: &str = "Keg";

/// Keg recipes. Specific crops come before the category-wide wine and juice
/// recipes so wheat becomes beer rather than juice.
pub fn recipes() -> Vec<Recipe> {
    let wine_factor = f64_to_fixed64(3.0);
    let juice_factor = f64_to_fixed64(2.25);
    vec![
        fixed_recipe("Beer", WHEAT, 1, BEER, 1, 1750),
        fixed_recipe("Pale Ale", HOPS, 1, PALE_ALE, 1, 2250),
        fixed_recipe("Coffee", COFFEE_BEAN, 5, COFFEE, 1, 120),
        fixed_recipe("Green Tea", TEA_LEAVES, 1, GREEN_TEA, 1, 180),
        fixed_recipe("Mead", HONEY, 1, MEAD, 1, 600),
        Recipe::new(
            "Wine",
            |item| item.category == ItemCategory::Fruit,
            1,
            move |fruit| {
                ItemStack::new(
                    artisan_good(WINE, "Wine", PreserveKind::Wine, fruit, wine_factor, 0),
                    1,
                )
            },
            10_000,
        ),
        Recipe::new(
            "Juice",
            |item| item.category == ItemCategory::Vegetable,
            1,
            move |vegetable| {
                ItemStack::new(
                    artisan_good(JUICE, "Juice", PreserveKind::Juice, vegetable, juice_factor, 0),
                    1,
                )
            },
            6000,
        ),
    ]
}

pub fn keg(object: ObjectMachine) -> RecipeMachine {
    RecipeMachine::new(object, recipes())
}
