//! One world location: a tile grid of placed objects and floors.

use crate::DiscoveryError;
use automate_core::id::LocationId;
use automate_core::tile::{TileArea, TilePosition};
use automate_core::world::{ChestEntity, ObjectHandle};
use slotmap::SlotMap;
use std::collections::BTreeMap;

slotmap::new_key_type! {
    /// Identifies a placed object within its location.
    pub struct ObjectId;
}

// ---------------------------------------------------------------------------
// Placed objects
// ---------------------------------------------------------------------------

/// What a placed object is, as far as the host world is concerned.
#[derive(Debug, Clone)]
pub enum WorldEntity {
    /// A processing object (furnace, keg, bee house).
    Machine(ObjectHandle),
    /// A chest, possibly linked to another chest's inventory.
    Chest(ChestEntity),
    /// Anything else: fences, signs, workbenches.
    Decoration,
}

#[derive(Debug, Clone)]
pub struct PlacedObject {
    pub name: String,
    pub area: TileArea,
    pub entity: WorldEntity,
}

// ---------------------------------------------------------------------------
// Tile changes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileChangeKind {
    ObjectPlaced,
    ObjectRemoved,
    FloorChanged,
    /// Terrain the engine never automates (grass, crops, debris).
    Terrain,
}

/// A change to a location's tiles, reported to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileChange {
    pub location: LocationId,
    pub area: TileArea,
    pub kind: TileChangeKind,
    pub name: String,
}

impl TileChange {
    pub fn terrain(location: LocationId, tile: TilePosition, name: impl Into<String>) -> Self {
        Self {
            location,
            area: TileArea::single(tile),
            kind: TileChangeKind::Terrain,
            name: name.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A tile grid of placed objects and floors.
///
/// Objects may cover several tiles; no two objects share a tile. Floors sit
/// underneath objects, one per tile.
#[derive(Debug)]
pub struct Location {
    id: LocationId,
    objects: SlotMap<ObjectId, PlacedObject>,
    tiles: BTreeMap<TilePosition, ObjectId>,
    floors: BTreeMap<TilePosition, String>,
}

impl Location {
    pub fn new(id: LocationId) -> Self {
        Self {
            id,
            objects: SlotMap::with_key(),
            tiles: BTreeMap::new(),
            floors: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    // -- Placement --

    /// Place an object covering `area`. Fails if any tile is taken.
    pub fn place(
        &mut self,
        name: impl Into<String>,
        area: TileArea,
        entity: WorldEntity,
    ) -> Result<(ObjectId, TileChange), DiscoveryError> {
        if let Some(taken) = area.tiles().find(|tile| self.tiles.contains_key(tile)) {
            return Err(DiscoveryError::Occupied(taken));
        }

        let name = name.into();
        let id = self.objects.insert(PlacedObject {
            name: name.clone(),
            area,
            entity,
        });
        for tile in area.tiles() {
            self.tiles.insert(tile, id);
        }
        Ok((id, self.change(area, TileChangeKind::ObjectPlaced, name)))
    }

    /// Remove a placed object, returning it.
    pub fn remove(&mut self, id: ObjectId) -> Result<(PlacedObject, TileChange), DiscoveryError> {
        let object = self.objects.remove(id).ok_or(DiscoveryError::NotPlaced)?;
        for tile in object.area.tiles() {
            self.tiles.remove(&tile);
        }
        let change = self.change(object.area, TileChangeKind::ObjectRemoved, object.name.clone());
        Ok((object, change))
    }

    /// Lay (or replace) the floor at `tile`.
    pub fn set_floor(&mut self, tile: TilePosition, kind: impl Into<String>) -> TileChange {
        let kind = kind.into();
        self.floors.insert(tile, kind.clone());
        self.change(TileArea::single(tile), TileChangeKind::FloorChanged, kind)
    }

    /// Pick up the floor at `tile`, if any.
    pub fn clear_floor(&mut self, tile: TilePosition) -> Option<TileChange> {
        let kind = self.floors.remove(&tile)?;
        Some(self.change(TileArea::single(tile), TileChangeKind::FloorChanged, kind))
    }

    fn change(&self, area: TileArea, kind: TileChangeKind, name: String) -> TileChange {
        TileChange {
            location: self.id.clone(),
            area,
            kind,
            name,
        }
    }

    // -- Queries --

    pub fn object(&self, id: ObjectId) -> Option<&PlacedObject> {
        self.objects.get(id)
    }

    pub fn object_at(&self, tile: TilePosition) -> Option<(ObjectId, &PlacedObject)> {
        let id = *self.tiles.get(&tile)?;
        self.objects.get(id).map(|object| (id, object))
    }

    pub fn floor_at(&self, tile: TilePosition) -> Option<&str> {
        self.floors.get(&tile).map(String::as_str)
    }

    /// Placed objects ordered by their origin tile.
    pub fn objects(&self) -> Vec<(ObjectId, &PlacedObject)> {
        let mut objects: Vec<_> = self.objects.iter().collect();
        objects.sort_by_key(|(_, object)| object.area.origin);
        objects
    }

    /// Floors in tile order.
    pub fn floors(&self) -> impl Iterator<Item = (TilePosition, &str)> {
        self.floors.iter().map(|(tile, kind)| (*tile, kind.as_str()))
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_occupied(&self, tile: TilePosition) -> bool {
        self.tiles.contains_key(&tile)
    }
}
