//! World-space edges of placed tiles.
//!
//! Edges are derived values: recomputed from the tile on every query and never
//! cached, so they cannot go stale when a tile moves.
//!
//! Conventions
//! - One edge per consecutive vertex pair (wrapping), in catalog order.
//! - `normal` is unit length and points away from the tile center, whatever
//!   the catalog winding.
//! - Zero-length edges have no normal and are dropped instead of yielding NaN.

use nalgebra::Vector2;

use crate::cfg::DEGENERATE_EDGE_EPS;
use crate::tile::Tile;
use crate::Point;

/// One side of a placed tile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
    pub length: f64,
    pub midpoint: Point,
    /// Unit outward normal.
    pub normal: Vector2<f64>,
}

impl Edge {
    /// Edge `start → end` of a polygon centered at `center`; `None` if degenerate.
    pub fn between(start: Point, end: Point, center: Point) -> Option<Edge> {
        let d = end - start;
        let length = d.norm();
        if !length.is_finite() || length <= DEGENERATE_EDGE_EPS {
            return None;
        }
        let midpoint = (start + end) * 0.5;
        let mut normal = Vector2::new(d.y / length, -d.x / length);
        if normal.dot(&(center - midpoint)) > 0.0 {
            normal = -normal;
        }
        Some(Edge {
            start,
            end,
            length,
            midpoint,
            normal,
        })
    }

    /// Unit vector `start → end`.
    #[inline]
    pub fn direction(&self) -> Vector2<f64> {
        (self.end - self.start) / self.length
    }

    /// Direction angle in degrees, folded into `[0, 180)`.
    pub fn angle_deg(&self) -> f64 {
        let d = self.end - self.start;
        let a = d.y.atan2(d.x).to_degrees().rem_euclid(180.0);
        if a >= 180.0 {
            a - 180.0
        } else {
            a
        }
    }

    #[inline]
    pub fn midpoint_distance(&self, other: &Edge) -> f64 {
        (self.midpoint - other.midpoint).norm()
    }
}

/// Edges of `tile` in catalog order.
pub fn edges_of(tile: &Tile) -> Vec<Edge> {
    edges_of_loop(&tile.world_vertices(), tile.pos)
}

/// Edges of an arbitrary closed vertex loop around `center`, skipping degenerate sides.
pub fn edges_of_loop(vertices: &[Point], center: Point) -> Vec<Edge> {
    let n = vertices.len();
    let mut out = Vec::with_capacity(n);
    for k in 0..n {
        if let Some(e) = Edge::between(vertices[k], vertices[(k + 1) % n], center) {
            out.push(e);
        }
    }
    out
}
