//! Automate Core -- the resource-negotiation layer for tile-based automation.
//!
//! This crate provides the building blocks every automation network is made
//! of: items and inventories, tracked stacks, the container abstraction, the
//! storage negotiation protocol, the machine contract, and machine groups.
//! Discovery (which tiles form a network) lives in `automate-spatial`; the
//! per-cycle scheduler lives in `automate-engine`.
//!
//! # Reserve, Then Commit
//!
//! Machines never write into containers directly. They ask a [`storage::Storage`]
//! view for ingredients, receive a [`storage::Consumable`] reservation, and
//! only commit it once they have decided to start:
//!
//! ```rust,ignore
//! let Some(coal) = storage.try_get_ingredient(|item| item.item_type == COAL, 1)? else {
//!     return Ok(false);
//! };
//! let Some((ore, recipe)) = storage.try_get_recipe_ingredient(&recipes)? else {
//!     return Ok(false);
//! };
//! let output = recipe.output_for(ore.sample());
//! ore.commit()?;
//! coal.commit()?;
//! ```
//!
//! # Key Types
//!
//! - [`tracked::TrackedStack`] -- a quantity-observing handle over an item stack.
//! - [`tracked::TrackedStackCollection`] -- several stackable tracked stacks
//!   treated as one.
//! - [`container::Container`] -- anything exposing an inventory to a network.
//! - [`storage::Storage`] -- one group's containers, de-duplicated by
//!   [`id::InventoryReferenceId`].
//! - [`machine::Machine`] -- per-machine-type processing strategy.
//! - [`group::MachineGroup`] -- one connected component of machines and
//!   containers.

pub mod container;
pub mod error;
pub mod fixed;
pub mod group;
pub mod id;
pub mod item;
pub mod machine;
pub mod recipe;
pub mod rng;
pub mod storage;
pub mod tile;
pub mod tracked;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
