//! Automate Machines -- the built-in machine catalog.
//!
//! Each module implements [`Machine`](automate_core::machine::Machine) for
//! one host processing object. Recipe-driven machines share
//! [`generic::RecipeMachine`]; passive producers (bee house, crystalarium)
//! and the feed hopper implement the contract directly.
//!
//! [`factory::register_standard`] wires chests and every machine here into a
//! [`HookRegistry`](automate_spatial::HookRegistry).

pub mod bee_house;
pub mod catalog;
pub mod cheese_press;
pub mod crystalarium;
pub mod factory;
pub mod feed_hopper;
pub mod furnace;
pub mod generic;
pub mod keg;
pub mod preserves_jar;
pub mod recycling;

pub use factory::{MACHINE_TYPES, MachineFactory, register_standard};
