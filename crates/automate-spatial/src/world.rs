use crate::DiscoveryError;
use crate::location::{Location, WorldEntity};
use automate_core::id::LocationId;
use automate_core::world::{FarmHandle, WorldClock};
use std::collections::BTreeMap;

/// The host world: its clock, farm counters, and every location.
#[derive(Debug, Default)]
pub struct World {
    pub clock: WorldClock,
    pub farm: FarmHandle,
    locations: BTreeMap<LocationId, Location>,
}

impl World {
    pub fn new(clock: WorldClock, farm: FarmHandle) -> Self {
        Self {
            clock,
            farm,
            locations: BTreeMap::new(),
        }
    }

    /// Add (or replace) a location.
    pub fn add_location(&mut self, location: Location) {
        self.locations.insert(location.id().clone(), location);
    }

    pub fn location(&self, id: &LocationId) -> Option<&Location> {
        self.locations.get(id)
    }

    pub fn location_mut(&mut self, id: &LocationId) -> Result<&mut Location, DiscoveryError> {
        self.locations
            .get_mut(id)
            .ok_or_else(|| DiscoveryError::UnknownLocation(id.clone()))
    }

    /// Location ids in name order.
    pub fn location_ids(&self) -> impl Iterator<Item = &LocationId> {
        self.locations.keys()
    }

    /// Advance every machine object's ready timer by `minutes`.
    ///
    /// Stands in for the host world's clock; the engine never calls it.
    pub fn advance_minutes(&mut self, minutes: u32) -> Result<(), DiscoveryError> {
        for location in self.locations.values() {
            for (_, object) in location.objects() {
                if let WorldEntity::Machine(handle) = &object.entity {
                    handle.borrow_mut()?.advance_minutes(minutes);
                }
            }
        }
        Ok(())
    }
}
