//! Placed tiles, their identifiers and the display palette.

use std::fmt;

use crate::affine::Affine2;
use crate::catalog::ShapeKind;
use crate::Point;

/// Opaque tile identifier, stable for the tile's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A placed, rotatable, colored instance of a catalog shape.
///
/// Invariants:
/// - `mirror_of` is `Some` only for symmetry-generated companions; such a tile
///   never spawns mirrors of its own.
/// - `rotation` is in degrees and may be any finite real (read mod 360).
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub id: TileId,
    pub shape: ShapeKind,
    /// World-space center.
    pub pos: Point,
    pub rotation: f64,
    /// Display attribute, opaque to the geometry.
    pub color: String,
    pub mirror_of: Option<TileId>,
}

impl Tile {
    pub fn new(id: TileId, shape: ShapeKind, pos: Point) -> Self {
        Self {
            id,
            shape,
            pos,
            rotation: 0.0,
            color: palette_color(id.0 as usize).to_string(),
            mirror_of: None,
        }
    }

    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[inline]
    pub fn is_mirror(&self) -> bool {
        self.mirror_of.is_some()
    }

    /// Local → world map for this tile's catalog vertices.
    #[inline]
    pub fn placement(&self) -> Affine2 {
        Affine2::placement(self.rotation, self.pos)
    }

    /// World-space vertex loop in catalog order.
    pub fn world_vertices(&self) -> Vec<Point> {
        let f = self.placement();
        self.shape.vertices().map(|v| f.apply(v)).collect()
    }

    /// Copy of this tile moved to `pos`.
    pub fn moved_to(&self, pos: Point) -> Tile {
        Tile {
            pos,
            ..self.clone()
        }
    }
}

/// Allocator for fresh tile identifiers.
///
/// Owned by the caller alongside its tile collection; the geometry only draws
/// from it when it has to create tiles (mirrors, sampled scenes).
#[derive(Clone, Debug, Default)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    /// Allocator whose first id is `first`.
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    /// Allocator that never collides with any id in `tiles`.
    pub fn after(tiles: &[Tile]) -> Self {
        let next = tiles.iter().map(|t| t.id.0 + 1).max().unwrap_or(0);
        Self { next }
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }
}

/// Fixed 16-color categorical palette; cycles by `i % 16`.
pub fn palette_color(i: usize) -> &'static str {
    const PALETTE: [&str; 16] = [
        "red",
        "orangered",
        "orange",
        "gold",
        "yellowgreen",
        "green",
        "mediumseagreen",
        "teal",
        "deepskyblue",
        "dodgerblue",
        "blueviolet",
        "purple",
        "fuchsia",
        "hotpink",
        "peru",
        "slategray",
    ];
    PALETTE[i % PALETTE.len()]
}
