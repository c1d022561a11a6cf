//! Extension points: entity factories and group-change observers.
//!
//! A [`HookRegistry`] is owned by the engine and shared (`Arc`) with whoever
//! extends it. Factories decide what a tile is; observers hear about every
//! group rebuild. Both lists are lock-guarded so registration from any call
//! site never races dispatch.

use crate::location::{Location, ObjectId, PlacedObject};
use crate::world::World;
use automate_core::container::Container;
use automate_core::group::GroupSummary;
use automate_core::id::LocationId;
use automate_core::machine::Machine;
use automate_core::tile::{TileArea, TilePosition};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

// ---------------------------------------------------------------------------
// Entity capabilities
// ---------------------------------------------------------------------------

/// What discovery is asking a factory about.
#[derive(Debug, Clone, Copy)]
pub enum TileEntity<'a> {
    Object {
        id: ObjectId,
        object: &'a PlacedObject,
    },
    Floor {
        tile: TilePosition,
        kind: &'a str,
    },
}

/// The capabilities an entity exposes to automation.
///
/// An entity may be a machine, a container, both, or only a connector.
pub struct Automatable {
    pub area: TileArea,
    pub machine: Option<Box<dyn Machine>>,
    pub container: Option<Rc<dyn Container>>,
    pub connector: bool,
}

impl Automatable {
    pub fn machine(area: TileArea, machine: impl Machine + 'static) -> Self {
        Self {
            area,
            machine: Some(Box::new(machine)),
            container: None,
            connector: false,
        }
    }

    pub fn container(area: TileArea, container: impl Container + 'static) -> Self {
        Self {
            area,
            machine: None,
            container: Some(Rc::new(container)),
            connector: false,
        }
    }

    pub fn connector(area: TileArea) -> Self {
        Self {
            area,
            machine: None,
            container: None,
            connector: true,
        }
    }

    /// Whether this links neighbours without doing any work itself.
    pub fn is_connector_only(&self) -> bool {
        self.machine.is_none() && self.container.is_none()
    }
}

impl fmt::Debug for Automatable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automatable")
            .field("area", &self.area)
            .field("machine", &self.machine.as_ref().map(|m| m.machine_type()))
            .field("container", &self.container.as_ref().map(|c| c.name()))
            .field("connector", &self.connector)
            .finish()
    }
}

/// Decides whether a tile entity is automatable.
///
/// Returning `None` passes the question to the next factory.
pub trait AutomationFactory: Send + Sync {
    fn name(&self) -> &str;

    fn automatable_for(
        &self,
        world: &World,
        location: &Location,
        entity: TileEntity<'_>,
    ) -> Option<Automatable>;
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Fired after a location's groups are rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupsChanged {
    pub location: LocationId,
    pub groups: Vec<GroupSummary>,
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Order in which factories are consulted. Lower runs first; registration
/// order breaks ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HookPriority {
    Pre = 0,
    #[default]
    Normal = 1,
    Post = 2,
}

/// Handle returned on registration, used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HookId(u64);

pub type GroupsObserver = Arc<dyn Fn(&GroupsChanged) + Send + Sync>;

struct FactoryEntry {
    id: HookId,
    priority: HookPriority,
    factory: Arc<dyn AutomationFactory>,
}

/// Entity factories and group-change observers.
#[derive(Default)]
pub struct HookRegistry {
    next_id: AtomicU64,
    factories: RwLock<Vec<FactoryEntry>>,
    observers: RwLock<Vec<(HookId, GroupsObserver)>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> HookId {
        HookId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    // -- Factories --

    pub fn register_factory(
        &self,
        priority: HookPriority,
        factory: impl AutomationFactory + 'static,
    ) -> HookId {
        let id = self.next_id();
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        factories.push(FactoryEntry {
            id,
            priority,
            factory: Arc::new(factory),
        });
        // Ids grow with registration, so they double as insertion order.
        factories.sort_by_key(|entry| (entry.priority, entry.id));
        id
    }

    /// Returns whether a factory was removed.
    pub fn unregister_factory(&self, id: HookId) -> bool {
        let mut factories = self.factories.write().unwrap_or_else(PoisonError::into_inner);
        let before = factories.len();
        factories.retain(|entry| entry.id != id);
        factories.len() != before
    }

    /// Factory names in consultation order.
    pub fn factory_names(&self) -> Vec<String> {
        self.factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.factory.name().to_string())
            .collect()
    }

    /// Ask each factory in turn; the first answer wins.
    pub fn resolve(
        &self,
        world: &World,
        location: &Location,
        entity: TileEntity<'_>,
    ) -> Option<Automatable> {
        let factories: Vec<Arc<dyn AutomationFactory>> = self
            .factories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|entry| entry.factory.clone())
            .collect();
        factories
            .iter()
            .find_map(|factory| factory.automatable_for(world, location, entity))
    }

    // -- Observers --

    pub fn subscribe(&self, observer: impl Fn(&GroupsChanged) + Send + Sync + 'static) -> HookId {
        let id = self.next_id();
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(observer)));
        id
    }

    /// Returns whether an observer was removed.
    pub fn unsubscribe(&self, id: HookId) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|(observer_id, _)| *observer_id != id);
        observers.len() != before
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Call every observer registered at the time of the call.
    ///
    /// The lock is released before dispatch, so observers may subscribe or
    /// unsubscribe from inside their callback.
    pub fn notify(&self, event: &GroupsChanged) {
        let observers: Vec<GroupsObserver> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in observers {
            observer(event);
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookRegistry")
            .field("factories", &self.factory_names())
            .field("observers", &self.observer_count())
            .finish()
    }
}
