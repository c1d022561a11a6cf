//! Tile geometry shared by locations, machines, and containers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// A tile position within one location.
///
/// Ordering is row-major (`y` first, then `x`) so that sorted tile sets read
/// top-left to bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(&self, other: &TilePosition) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Every other position within `radius` Manhattan distance, in row-major
    /// order. A radius of 1 yields the four cardinal neighbours.
    pub fn neighbors_within(&self, radius: u32) -> impl Iterator<Item = TilePosition> + use<> {
        let r = radius as i32;
        let origin = *self;
        (-r..=r).flat_map(move |dy| {
            let span = r - dy.abs();
            (-span..=span)
                .filter(move |&dx| dx != 0 || dy != 0)
                .map(move |dx| origin.offset(dx, dy))
        })
    }
}

impl PartialOrd for TilePosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TilePosition {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl fmt::Display for TilePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ---------------------------------------------------------------------------
// Areas
// ---------------------------------------------------------------------------

/// The rectangle of tiles an entity occupies. Origin is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileArea {
    pub origin: TilePosition,
    pub width: u32,
    pub height: u32,
}

impl TileArea {
    pub fn new(origin: TilePosition, width: u32, height: u32) -> Self {
        Self {
            origin,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// A 1x1 area.
    pub fn single(origin: TilePosition) -> Self {
        Self::new(origin, 1, 1)
    }

    /// Iterate over all tiles in the area, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = TilePosition> + use<> {
        let w = self.width as i32;
        let h = self.height as i32;
        let origin = self.origin;
        (0..h).flat_map(move |dy| (0..w).map(move |dx| origin.offset(dx, dy)))
    }

    pub fn contains(&self, tile: TilePosition) -> bool {
        tile.x >= self.origin.x
            && tile.y >= self.origin.y
            && tile.x < self.origin.x + self.width as i32
            && tile.y < self.origin.y + self.height as i32
    }
}

impl fmt::Display for TileArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 1 && self.height == 1 {
            write!(f, "{}", self.origin)
        } else {
            write!(f, "{} {}x{}", self.origin, self.width, self.height)
        }
    }
}
