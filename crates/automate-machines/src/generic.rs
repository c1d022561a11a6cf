//! Shared plumbing for machines backed by a host-world processing object.

use automate_core::error::AutomateError;
use automate_core::fixed::{Fixed64, scale_price};
use automate_core::id::{ItemTypeId, LocationId};
use automate_core::item::{Item, ItemCategory, ItemStack, PreserveKind};
use automate_core::machine::{Machine, MachineState};
use automate_core::recipe::Recipe;
use automate_core::storage::Storage;
use automate_core::tile::TileArea;
use automate_core::tracked::TrackedStack;
use automate_core::world::{ObjectHandle, WorldClock};
use tracing::trace;

// ---------------------------------------------------------------------------
// Object-backed machines
// ---------------------------------------------------------------------------

/// A machine's identity plus the processing object it drives.
#[derive(Debug, Clone)]
pub struct ObjectMachine {
    machine_type: String,
    location: LocationId,
    area: TileArea,
    object: ObjectHandle,
}

impl ObjectMachine {
    pub fn new(
        machine_type: impl Into<String>,
        location: LocationId,
        area: TileArea,
        object: ObjectHandle,
    ) -> Self {
        Self {
            machine_type: machine_type.into(),
            location,
            area,
            object,
        }
    }

    pub fn machine_type(&self) -> &str {
        &self.machine_type
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn area(&self) -> TileArea {
        self.area
    }

    pub fn object(&self) -> &ObjectHandle {
        &self.object
    }

    /// Empty with nothing held, Done once the host marks it ready, else
    /// Processing.
    pub fn object_state(&self) -> Result<MachineState, AutomateError> {
        let object = self.object.borrow()?;
        Ok(match (&object.held, object.ready_for_harvest) {
            (None, _) => MachineState::Empty,
            (Some(_), false) => MachineState::Processing,
            (Some(_), true) => MachineState::Done,
        })
    }

    /// The held output, only once it is ready.
    pub fn ready_output(&self) -> Result<Option<TrackedStack>, AutomateError> {
        if !self.object.borrow()?.ready_for_harvest {
            return Ok(None);
        }
        self.object.held_output()
    }

    pub fn start(&self, input: Option<Item>, output: ItemStack, minutes: u32) -> Result<(), AutomateError> {
        self.object.borrow_mut()?.start(input, output, minutes);
        Ok(())
    }

    pub fn reset(&self) -> Result<(), AutomateError> {
        self.object.borrow_mut()?.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Recipe machines
// ---------------------------------------------------------------------------

/// Consumed alongside every recipe (coal in a furnace).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fuel {
    pub item_type: ItemTypeId,
    pub count: u32,
}

/// A machine that turns one recipe input into one output.
///
/// Recipes are tried in declaration order; the first whose input the
/// network holds wins. With fuel configured, nothing is consumed unless
/// both the fuel and a recipe input are available.
#[derive(Debug)]
pub struct RecipeMachine {
    object: ObjectMachine,
    recipes: Vec<Recipe>,
    fuel: Option<Fuel>,
}

impl RecipeMachine {
    pub fn new(object: ObjectMachine, recipes: Vec<Recipe>) -> Self {
        Self {
            object,
            recipes,
            fuel: None,
        }
    }

    pub fn with_fuel(mut self, item_type: ItemTypeId, count: u32) -> Self {
        self.fuel = Some(Fuel { item_type, count });
        self
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn object(&self) -> &ObjectMachine {
        &self.object
    }
}

impl Machine for RecipeMachine {
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

    fn set_input(&mut self, storage: &Storage, _clock: &WorldClock) -> Result<bool, AutomateError> {
        let fuel = match self.fuel {
            Some(fuel) => {
                let found = storage.try_get_ingredient(|item| item.item_type == fuel.item_type, fuel.count)?;
                let Some(found) = found else {
                    return Ok(false);
                };
                Some(found)
            }
            None => None,
        };
        let Some((mut input, recipe)) = storage.try_get_recipe_ingredient(&self.recipes)? else {
            return Ok(false);
        };
        let Some(sample) = input.sample().cloned() else {
            return Ok(false);
        };

        let output = recipe.output_for(&sample);
        if output.quantity == 0 {
            return Err(self.fault(format!("recipe {} produced nothing", recipe.name())));
        }

        if let Some(fuel) = fuel {
            // Fuel and input may draw on the same stacks.
            let shared = fuel.sample().is_some_and(|f| f.can_stack_with(&sample));
            let needed = input.count().saturating_add(fuel.count());
            if shared && storage.count_matching(|item| item.can_stack_with(&sample))? < needed {
                return Ok(false);
            }
            fuel.commit()?;
            if shared {
                let count = input.count();
                input = storage
                    .try_get_ingredient(|item| recipe.accepts_input(item) && item.can_stack_with(&sample), count)?
                    .ok_or_else(|| self.fault("input was used up as fuel"))?;
            }
        }
        input.commit()?;
        trace!(
            machine = self.machine_type(),
            tile = %self.area().origin,
            recipe = recipe.name(),
            "started"
        );
        self.object.start(Some(sample), output, recipe.minutes())?;
        Ok(true)
    }
}

// ---------------------------------------------------------------------------
// Recipe helpers
// ---------------------------------------------------------------------------

/// A recipe consuming `count` of one item type into a fixed output.
pub fn fixed_recipe(
    name: &str,
    input: ItemTypeId,
    count: u32,
    output: ItemTypeId,
    quantity: u32,
    minutes: u32,
) -> Recipe {
    Recipe::new(
        name,
        move |item| item.item_type == input,
        count,
        move |_| ItemStack::new(crate::catalog::item(output), quantity),
        minutes,
    )
}

/// An artisan good named and priced after its input ("Blueberry Wine").
pub fn artisan_good(
    id: ItemTypeId,
    suffix: &str,
    kind: PreserveKind,
    input: &Item,
    factor: Fixed64,
    bonus: u32,
) -> Item {
    Item::new(
        id,
        format!("{} {suffix}", input.name),
        ItemCategory::ArtisanGoods,
        scale_price(input.price, factor).saturating_add(bonus),
    )
    .with_preserve(kind, input.item_type)
}
