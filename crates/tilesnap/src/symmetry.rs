//! Symmetry mirrors: reflected companions kept in lockstep with a primary tile.
//!
//! Mirrors are pure reflection arithmetic about a canvas center; edge geometry
//! plays no part. A mirror keeps a one-way `mirror_of` link to its primary and
//! is always rebuilt from the primary (never moved by a delta, never inverted
//! back into a pseudo-primary). Reflection of the same primary about the same
//! center is bit-identical every time, so regenerating is exact.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

use crate::tile::{Tile, TileId, TileIds};
use crate::Point;

/// Active symmetry rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SymmetryMode {
    #[default]
    None,
    Horizontal,
    Vertical,
    /// Both axes: three mirrors, 4-fold symmetry.
    Radial,
}

/// One reflection through the canvas center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reflection {
    /// Across the vertical axis `x = c.x`.
    Horizontal,
    /// Across the horizontal axis `y = c.y`.
    Vertical,
    /// Through the point `c` (both of the above).
    Point,
}

impl Reflection {
    #[inline]
    pub fn apply(self, p: Point, center: Point) -> Point {
        match self {
            Reflection::Horizontal => Vector2::new(2.0 * center.x - p.x, p.y),
            Reflection::Vertical => Vector2::new(p.x, 2.0 * center.y - p.y),
            Reflection::Point => Vector2::new(2.0 * center.x - p.x, 2.0 * center.y - p.y),
        }
    }
}

impl SymmetryMode {
    pub const ALL: [SymmetryMode; 4] = [
        SymmetryMode::None,
        SymmetryMode::Horizontal,
        SymmetryMode::Vertical,
        SymmetryMode::Radial,
    ];

    /// Reflections producing this mode's mirrors, in emission order.
    pub fn reflections(self) -> &'static [Reflection] {
        match self {
            SymmetryMode::None => &[],
            SymmetryMode::Horizontal => &[Reflection::Horizontal],
            SymmetryMode::Vertical => &[Reflection::Vertical],
            SymmetryMode::Radial => &[
                Reflection::Horizontal,
                Reflection::Vertical,
                Reflection::Point,
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SymmetryMode::None => "none",
            SymmetryMode::Horizontal => "horizontal",
            SymmetryMode::Vertical => "vertical",
            SymmetryMode::Radial => "radial",
        }
    }
}

impl fmt::Display for SymmetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSymmetryError(pub String);

impl fmt::Display for ParseSymmetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown symmetry mode {:?} (expected none, horizontal, vertical or radial)",
            self.0
        )
    }
}

impl std::error::Error for ParseSymmetryError {}

impl FromStr for SymmetryMode {
    type Err = ParseSymmetryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        SymmetryMode::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseSymmetryError(s.to_string()))
    }
}

/// Mirrors of `tile` under `mode` about `center`, each with a fresh id from `ids`.
///
/// Shape, rotation and color are copied unchanged. A mirror tile has no mirrors.
pub fn mirrors_of(tile: &Tile, mode: SymmetryMode, center: Point, ids: &mut TileIds) -> Vec<Tile> {
    if tile.is_mirror() {
        return Vec::new();
    }
    mode.reflections()
        .iter()
        .map(|r| Tile {
            id: ids.next_id(),
            pos: r.apply(tile.pos, center),
            mirror_of: Some(tile.id),
            ..tile.clone()
        })
        .collect()
}

/// Replace every mirror of `primary` in `tiles` with a freshly generated set.
///
/// Returns the number of mirrors now present for `primary`. Unknown or mirror
/// ids only drop stale mirrors.
pub fn regenerate_mirrors(
    tiles: &mut Vec<Tile>,
    primary: TileId,
    mode: SymmetryMode,
    center: Point,
    ids: &mut TileIds,
) -> usize {
    tiles.retain(|t| t.mirror_of != Some(primary));
    let Some(source) = tiles.iter().find(|t| t.id == primary) else {
        return 0;
    };
    let fresh = mirrors_of(source, mode, center, ids);
    let n = fresh.len();
    tiles.extend(fresh);
    n
}

/// Mode and center implied by the mirrors of `primary` currently in `tiles`.
///
/// Three mirrors mean radial, whose center is the mean of the four positions.
/// One mirror sharing the primary's `y` is horizontal, otherwise vertical; the
/// reflected coordinate of the center is their midpoint and the other comes
/// from `fallback`. No mirrors give `None` about `fallback`.
pub fn infer_symmetry(tiles: &[Tile], primary: TileId, fallback: Point) -> (SymmetryMode, Point) {
    let Some(source) = tiles.iter().find(|t| t.id == primary) else {
        return (SymmetryMode::None, fallback);
    };
    let mirrors: Vec<&Tile> = tiles.iter().filter(|t| t.mirror_of == Some(primary)).collect();
    match mirrors.as_slice() {
        [m] if m.pos.y == source.pos.y && m.pos.x != source.pos.x => (
            SymmetryMode::Horizontal,
            Vector2::new(0.5 * (source.pos.x + m.pos.x), fallback.y),
        ),
        [m] => (
            SymmetryMode::Vertical,
            Vector2::new(fallback.x, 0.5 * (source.pos.y + m.pos.y)),
        ),
        [_, _, _] => {
            let sum = mirrors.iter().fold(source.pos, |acc, m| acc + m.pos);
            (SymmetryMode::Radial, sum * 0.25)
        }
        _ => (SymmetryMode::None, fallback),
    }
}

/// Drop all mirrors and rebuild them for every primary (e.g. after a mode change).
pub fn regenerate_all(tiles: &mut Vec<Tile>, mode: SymmetryMode, center: Point, ids: &mut TileIds) {
    tiles.retain(|t| !t.is_mirror());
    let fresh: Vec<Tile> = tiles
        .iter()
        .flat_map(|t| mirrors_of(t, mode, center, ids))
        .collect();
    tiles.extend(fresh);
}
