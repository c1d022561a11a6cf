//! The group scheduler.
//!
//! Each cycle runs two phases:
//!
//! 1. **Reload** -- rebuild the groups of every queued location and notify
//!    observers with the new group set.
//! 2. **Process** -- for each group, push finished output into the group's
//!    storage and feed empty machines from it.
//!
//! A machine fault is logged and counted, and its siblings still run. A
//! panic inside one group is caught at the group boundary so the remaining
//! groups are still processed. A panic while discovering one location leaves
//! that location without groups until it is queued again.

use crate::config::AutomateConfig;
use crate::reload_queue::ReloadQueue;
use automate_core::error::AutomateError;
use automate_core::fixed::Ticks;
use automate_core::group::{GroupSummary, MachineGroup};
use automate_core::id::LocationId;
use automate_core::machine::{Machine, MachineState};
use automate_core::storage::Storage;
use automate_core::tracked::Tracked;
use automate_core::world::WorldClock;
use automate_spatial::{
    DiscoveryConfig, DiscoveryError, GroupsChanged, HookRegistry, TileChange, TileChangeKind,
    World, discover_groups,
};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// What one cycle did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub locations_rebuilt: usize,
    pub groups_processed: usize,
    /// Machines that started processing this cycle.
    pub machines_pulled: usize,
    /// Machines that moved at least one item of output into storage.
    pub machines_pushed: usize,
    pub faults: usize,
}

impl CycleReport {
    fn absorb(&mut self, group: GroupOutcome) {
        self.machines_pulled += group.pulled;
        self.machines_pushed += group.pushed;
        self.faults += group.faults;
    }
}

#[derive(Debug, Default)]
struct GroupOutcome {
    pulled: usize,
    pushed: usize,
    faults: usize,
}

#[derive(Debug, Default)]
struct MachineStep {
    pulled: bool,
    pushed: bool,
}

pub struct AutomationEngine {
    config: AutomateConfig,
    discovery: DiscoveryConfig,
    registry: Arc<HookRegistry>,
    queue: ReloadQueue,
    groups: BTreeMap<LocationId, Vec<MachineGroup>>,
}

impl AutomationEngine {
    /// An engine with no groups. The first cycle discovers every location.
    pub fn new(config: AutomateConfig, registry: Arc<HookRegistry>) -> Self {
        let config = config.normalized();
        Self {
            discovery: config.discovery(),
            config,
            registry,
            queue: ReloadQueue::new(),
            groups: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &AutomateConfig {
        &self.config
    }

    /// Replace the configuration. Discovery policy may have changed, so every
    /// location is rebuilt on the next cycle.
    pub fn set_config(&mut self, config: AutomateConfig) {
        self.config = config.normalized();
        self.discovery = self.config.discovery();
        self.queue.queue_all();
    }

    pub fn registry(&self) -> &Arc<HookRegistry> {
        &self.registry
    }

    pub fn reload_queue(&self) -> &ReloadQueue {
        &self.queue
    }

    // -----------------------------------------------------------------------
    // Reload requests
    // -----------------------------------------------------------------------

    /// Queue the changed location unless the change can't affect
    /// automation. Returns whether the location was newly queued.
    pub fn on_tile_changed(&mut self, change: &TileChange) -> bool {
        if change.kind == TileChangeKind::Terrain {
            return false;
        }
        self.queue_reload(change.location.clone())
    }

    pub fn queue_reload(&mut self, location: LocationId) -> bool {
        let queued = self.queue.queue(location);
        if queued {
            trace!(queued = self.queue.len(), "location queued for reload");
        }
        queued
    }

    /// Drop every group and queued reload. The next cycle starts cold.
    pub fn reset(&mut self) {
        debug!(locations = self.groups.len(), "automation reset");
        self.groups.clear();
        self.queue.queue_all();
    }

    // -----------------------------------------------------------------------
    // Cycles
    // -----------------------------------------------------------------------

    /// Host tick entry point. Runs a cycle every `automation_interval` ticks.
    pub fn update(&mut self, world: &World, tick: Ticks) -> Option<CycleReport> {
        if !self.config.enabled {
            if !self.groups.is_empty() {
                self.reset();
            }
            return None;
        }
        if tick % self.config.automation_interval != 0 {
            return None;
        }
        Some(self.run_cycle(world))
    }

    /// Run one cycle immediately.
    pub fn run_cycle(&mut self, world: &World) -> CycleReport {
        let mut report = CycleReport::default();
        self.reload(world, &mut report);

        for (location, groups) in self.groups.iter_mut() {
            for group in groups.iter_mut() {
                report.groups_processed += 1;
                let clock = &world.clock;
                match panic::catch_unwind(AssertUnwindSafe(|| process_group(group, clock))) {
                    Ok(outcome) => report.absorb(outcome),
                    Err(payload) => {
                        warn!(
                            location = %location,
                            group = %group.id(),
                            panic = %panic_message(payload.as_ref()),
                            "group processing panicked"
                        );
                        report.faults += 1;
                    }
                }
            }
        }

        if report != CycleReport::default() {
            debug!(
                rebuilt = report.locations_rebuilt,
                groups = report.groups_processed,
                pulled = report.machines_pulled,
                pushed = report.machines_pushed,
                faults = report.faults,
                "automation cycle"
            );
        }
        report
    }

    fn reload(&mut self, world: &World, report: &mut CycleReport) {
        let locations: Vec<LocationId> = match self.queue.drain() {
            Some(locations) => locations,
            None => {
                self.groups.clear();
                world.location_ids().cloned().collect()
            }
        };

        for location in locations {
            let (registry, discovery) = (&self.registry, &self.discovery);
            let discovered = panic::catch_unwind(AssertUnwindSafe(|| {
                discover_groups(world, &location, registry, discovery)
            }));
            let groups = match discovered {
                Ok(Ok(groups)) => {
                    report.locations_rebuilt += 1;
                    groups
                }
                Ok(Err(DiscoveryError::UnknownLocation(_))) => {
                    debug!(location = %location, "location no longer exists");
                    report.locations_rebuilt += 1;
                    Vec::new()
                }
                Ok(Err(error)) => {
                    warn!(location = %location, %error, "group discovery failed");
                    report.faults += 1;
                    Vec::new()
                }
                Err(payload) => {
                    warn!(
                        location = %location,
                        panic = %panic_message(payload.as_ref()),
                        "group discovery panicked"
                    );
                    report.faults += 1;
                    Vec::new()
                }
            };

            let event = GroupsChanged {
                location: location.clone(),
                groups: groups.iter().map(MachineGroup::summary).collect(),
            };
            if groups.is_empty() {
                self.groups.remove(&location);
            } else {
                self.groups.insert(location, groups);
            }
            self.registry.notify(&event);
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The current groups of `location`, in discovery order.
    pub fn groups(&self, location: &LocationId) -> &[MachineGroup] {
        self.groups.get(location).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn group_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Snapshots of every group, by location name then group id.
    pub fn summaries(&self) -> Vec<GroupSummary> {
        self.groups
            .values()
            .flatten()
            .map(MachineGroup::summary)
            .collect()
    }

    /// One line per group followed by its members, for console output.
    pub fn describe_groups(&self, location: &LocationId) -> String {
        let groups = self.groups(location);
        if groups.is_empty() {
            return format!("no automation groups in {location}\n");
        }
        let mut out = String::new();
        for summary in groups.iter().map(MachineGroup::summary) {
            let _ = writeln!(out, "{summary}");
            for machine in &summary.machines {
                let _ = writeln!(out, "  machine {} at {}", machine.name, machine.tile);
            }
            for container in &summary.containers {
                let _ = writeln!(out, "  container {} at {}", container.name, container.tile);
            }
        }
        out
    }
}

impl std::fmt::Debug for AutomationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutomationEngine")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field("groups", &self.group_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Group processing
// ---------------------------------------------------------------------------

fn process_group(group: &mut MachineGroup, clock: &WorldClock) -> GroupOutcome {
    let mut outcome = GroupOutcome::default();
    if !group.has_internal_automation() {
        return outcome;
    }
    let storage = group.storage();
    let location = group.location().clone();
    for machine in group.machines_mut() {
        match process_machine(machine.as_mut(), &storage, clock) {
            Ok(step) => {
                outcome.pulled += usize::from(step.pulled);
                outcome.pushed += usize::from(step.pushed);
            }
            Err(error) => {
                warn!(
                    location = %location,
                    machine = machine.machine_type(),
                    tile = %machine.area().origin,
                    %error,
                    "machine fault"
                );
                outcome.faults += 1;
            }
        }
    }
    outcome
}

/// Push a finished machine's output, then feed it if it ended up empty.
fn process_machine(
    machine: &mut dyn Machine,
    storage: &Storage,
    clock: &WorldClock,
) -> Result<MachineStep, AutomateError> {
    let mut step = MachineStep::default();
    let mut state = machine.state(clock)?;

    if state == MachineState::Done {
        if let Some(mut output) = machine.output()? {
            let accepted = storage.try_push(&mut output)?;
            step.pushed = accepted > 0;
            if output.count() == 0 {
                machine.on_output_taken(clock)?;
            }
            trace!(
                machine = machine.machine_type(),
                tile = %machine.area().origin,
                accepted,
                remaining = output.count(),
                "output pushed"
            );
        }
        state = machine.state(clock)?;
    }

    if state == MachineState::Empty && machine.set_input(storage, clock)? {
        step.pulled = true;
        trace!(
            machine = machine.machine_type(),
            tile = %machine.area().origin,
            "machine started"
        );
    }
    Ok(step)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
