//! Suggestion synthesis: propose tiles that extend the pattern along exposed edges.
//!
//! Recomputed from scratch on every call. Only primary tiles are sources;
//! mirrors would just echo their primary's suggestions.
//!
//! Model
//! - Take every other edge of each source tile (even indices) to bound density.
//! - Band the edge by direction angle: axis-aligned edges take squares or
//!   hexagons, 60°/120° edges take triangles or hexagons, anything else takes
//!   triangles. Within a tile, successive selected edges cycle through the band.
//! - Center the candidate one `center_to_edge` outside the edge midpoint.
//! - Drop candidates outside the canvas (edges included) or strictly closer
//!   than `clearance` to any tile center. A tile exactly `clearance` away does
//!   not block; that is where a same-size neighbor sits flush.
//! - Rotation is always 0; suggestions do not follow the edge angle.

use tracing::debug;

use crate::catalog::ShapeKind;
use crate::cfg::SuggestCfg;
use crate::edge::{edges_of, Edge};
use crate::tile::Tile;
use crate::Point;

/// A proposed, uncommitted placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Suggestion {
    pub pos: Point,
    pub shape: ShapeKind,
    pub rotation: f64,
}

/// Orientation band of an edge direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeBand {
    /// Near 0° or 90°.
    Axis,
    /// Near 60° or 120°.
    Oblique,
    Other,
}

impl EdgeBand {
    /// Classify a direction angle in `[0, 180)` degrees.
    pub fn classify(angle_deg: f64, tolerance_deg: f64) -> EdgeBand {
        let near = |target: f64| (angle_deg - target).abs() <= tolerance_deg;
        if near(0.0) || near(180.0) || near(90.0) {
            EdgeBand::Axis
        } else if near(60.0) || near(120.0) {
            EdgeBand::Oblique
        } else {
            EdgeBand::Other
        }
    }

    pub fn candidates(self) -> &'static [ShapeKind] {
        match self {
            EdgeBand::Axis => &[ShapeKind::Square, ShapeKind::Hexagon],
            EdgeBand::Oblique => &[ShapeKind::Triangle, ShapeKind::Hexagon],
            EdgeBand::Other => &[ShapeKind::Triangle],
        }
    }
}

/// Suggestions for `tiles`; empty when `enabled` is false.
pub fn synthesize(tiles: &[Tile], enabled: bool, cfg: &SuggestCfg) -> Vec<Suggestion> {
    if !enabled {
        return Vec::new();
    }
    let mut out = Vec::new();
    for tile in tiles.iter().filter(|t| !t.is_mirror()) {
        let edges = edges_of(tile);
        for (ordinal, edge) in edges.iter().step_by(2).enumerate() {
            let band = EdgeBand::classify(edge.angle_deg(), cfg.band_tolerance_deg);
            let choices = band.candidates();
            let shape = choices[ordinal % choices.len()];
            let pos = placement(edge, shape);
            if accepts(pos, tiles, cfg) {
                out.push(Suggestion {
                    pos,
                    shape,
                    rotation: 0.0,
                });
            }
        }
    }
    debug!(tiles = tiles.len(), suggestions = out.len(), "suggest");
    out
}

/// Center of a `shape` placed flush against `edge`, outside its tile.
#[inline]
pub fn placement(edge: &Edge, shape: ShapeKind) -> Point {
    edge.midpoint + edge.normal * shape.center_to_edge()
}

fn accepts(pos: Point, tiles: &[Tile], cfg: &SuggestCfg) -> bool {
    cfg.bounds.contains(pos) && tiles.iter().all(|t| (t.pos - pos).norm() >= cfg.clearance)
}
