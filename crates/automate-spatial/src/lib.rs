//! Automate Spatial -- locations, entity hooks, and connectivity discovery.
//!
//! A [`Location`] is a tile grid of placed objects and floors. Discovery asks
//! the registered [`AutomationFactory`] hooks what each tile is (machine,
//! container, connector, or nothing), then flood-fills adjacent automatable
//! tiles into [`MachineGroup`](automate_core::group::MachineGroup)s.
//!
//! Every placement and removal returns a [`TileChange`] for the caller to hand
//! to the engine's reload queue.

pub mod chest;
pub mod discovery;
pub mod hooks;
pub mod location;
pub mod world;

pub use chest::ChestFactory;
pub use discovery::{DiscoveryConfig, MachineOverride, discover_groups};
pub use hooks::{
    Automatable, AutomationFactory, GroupsChanged, HookId, HookPriority, HookRegistry, TileEntity,
};
pub use location::{Location, ObjectId, PlacedObject, TileChange, TileChangeKind, WorldEntity};
pub use world::World;

use automate_core::error::AutomateError;
use automate_core::id::LocationId;
use automate_core::tile::TilePosition;

/// Errors from placing objects or discovering groups.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("unknown location {0}")]
    UnknownLocation(LocationId),
    #[error("tile {0} is occupied")]
    Occupied(TilePosition),
    #[error("object is not placed in this location")]
    NotPlaced,
    #[error(transparent)]
    Automate(#[from] AutomateError),
}
