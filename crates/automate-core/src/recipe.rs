use crate::item::{Item, ItemStack};
use std::fmt;

/// Predicate deciding whether an item satisfies an input.
pub type ItemPredicate = Box<dyn Fn(&Item) -> bool>;

/// Maps the consumed input sample to the produced output.
pub type OutputRule = Box<dyn Fn(&Item) -> ItemStack>;

/// One input-to-output transformation a machine can perform.
///
/// The input is described by a predicate rather than a fixed item type so
/// that a recipe can accept a whole category ("any fruit"). The output is
/// derived from the actual input sample (a blueberry becomes blueberry wine).
pub struct Recipe {
    name: String,
    accepts: ItemPredicate,
    input_count: u32,
    output: OutputRule,
    minutes: u32,
}

impl Recipe {
    pub fn new(
        name: impl Into<String>,
        accepts: impl Fn(&Item) -> bool + 'static,
        input_count: u32,
        output: impl Fn(&Item) -> ItemStack + 'static,
        minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            accepts: Box::new(accepts),
            input_count: input_count.max(1),
            output: Box::new(output),
            minutes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts_input(&self, item: &Item) -> bool {
        (self.accepts)(item)
    }

    /// How many matching items one run consumes.
    pub fn input_count(&self) -> u32 {
        self.input_count
    }

    /// Output for the given input sample.
    pub fn output_for(&self, input: &Item) -> ItemStack {
        (self.output)(input)
    }

    /// In-game minutes until the output is ready.
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recipe")
            .field("name", &self.name)
            .field("input_count", &self.input_count)
            .field("minutes", &self.minutes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ItemTypeId;
    use crate::item::ItemCategory;

    #[test]
    fn recipe_derives_output_from_input() {
        let recipe = Recipe::new(
            "Jelly",
            |item| item.category == ItemCategory::Fruit,
            1,
            |input| {
                ItemStack::new(
                    Item::new(
                        ItemTypeId(344),
                        format!("{} Jelly", input.name),
                        ItemCategory::ArtisanGoods,
                        input.price * 2 + 50,
                    ),
                    1,
                )
            },
            4000,
        );
        let blueberry = Item::new(ItemTypeId(258), "Blueberry", ItemCategory::Fruit, 50);
        let coal = Item::new(ItemTypeId(382), "Coal", ItemCategory::BuildingResource, 15);

        assert!(recipe.accepts_input(&blueberry));
        assert!(!recipe.accepts_input(&coal));

        let out = recipe.output_for(&blueberry);
        assert_eq!(out.item.name, "Blueberry Jelly");
        assert_eq!(out.item.price, 150);
        assert_eq!(recipe.minutes(), 4000);
        assert_eq!(recipe.name(), "Jelly");
    }

    #[test]
    fn zero_input_count_is_clamped() {
        let recipe = Recipe::new(
            "Nothing",
            |_| true,
            0,
            |input| ItemStack::new(input.clone(), 1),
            10,
        );
        assert_eq!(recipe.input_count(), 1);
    }
}
