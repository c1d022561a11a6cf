//! Machine groups: one connected component of machines and containers.

use crate::container::Container;
use crate::id::{GroupId, LocationId};
use crate::machine::Machine;
use crate::storage::Storage;
use crate::tile::TilePosition;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// A connected set of machines and containers within one location.
///
/// Membership is fixed when the group is built. The scheduler may drive the
/// machines (`machines_mut`) but there is no way to add or remove members;
/// a change means discovery builds a new group.
pub struct MachineGroup {
    id: GroupId,
    location: LocationId,
    machines: Vec<Box<dyn Machine>>,
    containers: Vec<Rc<dyn Container>>,
    tiles: BTreeSet<TilePosition>,
}

impl MachineGroup {
    pub fn new(
        id: GroupId,
        location: LocationId,
        machines: Vec<Box<dyn Machine>>,
        containers: Vec<Rc<dyn Container>>,
        tiles: BTreeSet<TilePosition>,
    ) -> Self {
        Self {
            id,
            location,
            machines,
            containers,
            tiles,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn machines(&self) -> &[Box<dyn Machine>] {
        &self.machines
    }

    pub fn machines_mut(&mut self) -> &mut [Box<dyn Machine>] {
        &mut self.machines
    }

    pub fn containers(&self) -> &[Rc<dyn Container>] {
        &self.containers
    }

    /// Every tile the group covers, connectors included.
    pub fn tiles(&self) -> &BTreeSet<TilePosition> {
        &self.tiles
    }

    /// A fresh storage view over the group's containers.
    pub fn storage(&self) -> Storage {
        Storage::new(self.containers.iter().cloned())
    }

    /// Whether the group has anything for the scheduler to do.
    pub fn has_internal_automation(&self) -> bool {
        !self.machines.is_empty()
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id,
            location: self.location.clone(),
            tiles: self.tiles.iter().copied().collect(),
            machines: self
                .machines
                .iter()
                .map(|m| MemberSummary {
                    name: m.machine_type().to_string(),
                    tile: m.area().origin,
                })
                .collect(),
            containers: self
                .containers
                .iter()
                .map(|c| MemberSummary {
                    name: c.name().to_string(),
                    tile: c.area().origin,
                })
                .collect(),
        }
    }
}

impl fmt::Debug for MachineGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineGroup")
            .field("id", &self.id)
            .field("location", &self.location)
            .field(
                "machines",
                &self.machines.iter().map(|m| m.machine_type()).collect::<Vec<_>>(),
            )
            .field(
                "containers",
                &self.containers.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("tiles", &self.tiles.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// A named group member and the tile it is anchored at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSummary {
    pub name: String,
    pub tile: TilePosition,
}

/// Read-only snapshot of a group. Owns no world state, so it can be handed to
/// observers on any thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id: GroupId,
    pub location: LocationId,
    pub tiles: Vec<TilePosition>,
    pub machines: Vec<MemberSummary>,
    pub containers: Vec<MemberSummary>,
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "group {} in {}: {} machines, {} containers, {} tiles",
            self.id,
            self.location,
            self.machines.len(),
            self.containers.len(),
            self.tiles.len()
        )
    }
}
