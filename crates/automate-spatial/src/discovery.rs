//! Connectivity discovery: flood-fill a location's automatable tiles into
//! machine groups.
//!
//! Discovery is a pure function of the location's current tiles and the
//! registered factories. It keeps no state between runs, so rebuilding one
//! location after a change yields exactly the groups a full rescan would.

use crate::DiscoveryError;
use crate::hooks::{Automatable, HookRegistry, TileEntity};
use crate::location::Location;
use crate::world::World;
use automate_core::container::Container;
use automate_core::group::MachineGroup;
use automate_core::id::{GroupId, LocationId};
use automate_core::machine::Machine;
use automate_core::tile::TileArea;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Per-machine-type overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineOverride {
    /// Whether machines of this type are automated at all.
    pub enabled: bool,
    /// Higher runs first within a group.
    pub priority: i32,
}

impl Default for MachineOverride {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: 0,
        }
    }
}

/// Discovery policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Manhattan distance within which two tiles are adjacent. 1 means the
    /// four cardinal neighbours.
    pub adjacency_radius: u32,
    /// Object or floor names that link neighbours (case-insensitive).
    pub connectors: Vec<String>,
    pub machine_overrides: BTreeMap<String, MachineOverride>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            adjacency_radius: 1,
            connectors: vec!["Workbench".to_string()],
            machine_overrides: BTreeMap::new(),
        }
    }
}

impl DiscoveryConfig {
    pub fn is_connector(&self, name: &str) -> bool {
        self.connectors.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    pub fn override_for(&self, machine_type: &str) -> MachineOverride {
        self.machine_overrides
            .get(machine_type)
            .copied()
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tile classification
// ---------------------------------------------------------------------------

/// One automatable entity found in the location.
struct Node {
    area: TileArea,
    machine: Option<Box<dyn Machine>>,
    container: Option<Rc<dyn Container>>,
}

impl Node {
    fn from_automatable(found: Automatable, config: &DiscoveryConfig) -> Option<Self> {
        let Automatable {
            area,
            mut machine,
            container,
            connector,
        } = found;

        if let Some(m) = &machine
            && !config.override_for(m.machine_type()).enabled
        {
            trace!(machine = m.machine_type(), tile = %area.origin, "machine type disabled");
            machine = None;
        }
        if machine.is_none() && container.is_none() && !connector {
            return None;
        }
        Some(Self {
            area,
            machine,
            container,
        })
    }

    fn connector(area: TileArea) -> Self {
        Self {
            area,
            machine: None,
            container: None,
        }
    }
}

/// Classify every object and floor in `location`.
///
/// An automatable object wins over the floor beneath it. Objects the hooks
/// don't recognise still link neighbours if their name is a connector.
fn classify(
    world: &World,
    location: &Location,
    registry: &HookRegistry,
    config: &DiscoveryConfig,
) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut covered = BTreeSet::new();

    for (id, object) in location.objects() {
        let node = match registry.resolve(world, location, TileEntity::Object { id, object }) {
            Some(found) => Node::from_automatable(found, config),
            None if config.is_connector(&object.name) => Some(Node::connector(object.area)),
            None => None,
        };
        if let Some(node) = node {
            covered.extend(node.area.tiles());
            nodes.push(node);
        }
    }

    for (tile, kind) in location.floors() {
        if covered.contains(&tile) {
            continue;
        }
        let node = match registry.resolve(world, location, TileEntity::Floor { tile, kind }) {
            Some(found) => Node::from_automatable(found, config),
            None if config.is_connector(kind) => Some(Node::connector(TileArea::single(tile))),
            None => None,
        };
        if let Some(node) = node {
            nodes.push(node);
        }
    }

    nodes.sort_by_key(|node| node.area.origin);
    nodes
}

// ---------------------------------------------------------------------------
// Flood fill
// ---------------------------------------------------------------------------

/// Indices of each connected component of `areas`, each sorted ascending,
/// components ordered by their lowest index.
fn connected_components(areas: &[TileArea], radius: u32) -> Vec<Vec<usize>> {
    let mut by_tile = BTreeMap::new();
    for (index, area) in areas.iter().enumerate() {
        for tile in area.tiles() {
            by_tile.insert(tile, index);
        }
    }

    let mut visited = vec![false; areas.len()];
    let mut components = Vec::new();
    for start in 0..areas.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut queue = VecDeque::from([start]);
        let mut component = Vec::new();

        while let Some(current) = queue.pop_front() {
            component.push(current);
            for tile in areas[current].tiles() {
                for neighbor in tile.neighbors_within(radius) {
                    if let Some(&next) = by_tile.get(&neighbor)
                        && !visited[next]
                    {
                        visited[next] = true;
                        queue.push_back(next);
                    }
                }
            }
        }

        component.sort_unstable();
        components.push(component);
    }
    components
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Rebuild the machine groups of one location.
///
/// Components made only of connectors are dropped. Within a group, machines
/// run by descending override priority, then tile order; containers keep
/// tile order.
pub fn discover_groups(
    world: &World,
    location_id: &LocationId,
    registry: &HookRegistry,
    config: &DiscoveryConfig,
) -> Result<Vec<MachineGroup>, DiscoveryError> {
    let location = world
        .location(location_id)
        .ok_or_else(|| DiscoveryError::UnknownLocation(location_id.clone()))?;

    let nodes = classify(world, location, registry, config);
    let areas: Vec<TileArea> = nodes.iter().map(|node| node.area).collect();
    let components = connected_components(&areas, config.adjacency_radius.max(1));
    let mut nodes: Vec<Option<Node>> = nodes.into_iter().map(Some).collect();

    let mut groups = Vec::new();
    for component in components {
        let mut machines: Vec<(i32, Box<dyn Machine>)> = Vec::new();
        let mut containers = Vec::new();
        let mut tiles = BTreeSet::new();
        for index in component {
            let Some(node) = nodes[index].take() else {
                continue;
            };
            tiles.extend(node.area.tiles());
            if let Some(machine) = node.machine {
                let priority = config.override_for(machine.machine_type()).priority;
                machines.push((priority, machine));
            }
            if let Some(container) = node.container {
                containers.push(container);
            }
        }
        if machines.is_empty() && containers.is_empty() {
            continue;
        }

        // Stable, so equal priorities keep tile order.
        machines.sort_by_key(|(priority, _)| std::cmp::Reverse(*priority));
        let id = GroupId(groups.len() as u32);
        groups.push(MachineGroup::new(
            id,
            location_id.clone(),
            machines.into_iter().map(|(_, machine)| machine).collect(),
            containers,
            tiles,
        ));
    }

    debug!(location = %location_id, groups = groups.len(), "discovered machine groups");
    Ok(groups)
}
