//! Snap resolution: where should a released tile land?
//!
//! `resolve` is pairwise: it searches every (moving edge, stationary edge)
//! pair and keeps the compatible pair with the closest midpoints. Ties keep
//! the pair met first in emission order (moving edges outer, stationary inner).
//! The resulting translation puts the moving midpoint onto the stationary one,
//! then pushes `separation_push` along the stationary outward normal so the
//! two sides never coincide.
//!
//! `resolve_among` is the caller-side contest across many tiles: the nearest
//! pairwise snap wins, first tile on exact ties.

use tracing::{debug, trace};

use crate::cfg::SnapCfg;
use crate::compat::is_compatible;
use crate::edge::edges_of;
use crate::tile::{Tile, TileId};
use crate::Point;

/// A resolved snap of a moving tile onto a stationary one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snap {
    /// New center for the moving tile.
    pub position: Point,
    /// Midpoint distance of the winning edge pair before the move.
    pub distance: f64,
    pub moving_edge: usize,
    pub stationary_edge: usize,
}

/// Winner of a multi-tile snap contest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapTarget {
    pub target: TileId,
    pub snap: Snap,
}

/// Best snap of `moving` onto `stationary`, or `None` when no edge pair is compatible.
pub fn resolve(moving: &Tile, stationary: &Tile, cfg: &SnapCfg) -> Option<Snap> {
    let me = edges_of(moving);
    let se = edges_of(stationary);
    let mut best: Option<(usize, usize, f64)> = None;
    for (i, e1) in me.iter().enumerate() {
        for (j, e2) in se.iter().enumerate() {
            if !is_compatible(e1, e2, cfg) {
                continue;
            }
            let d = e1.midpoint_distance(e2);
            if best.as_ref().is_none_or(|&(_, _, bd)| d < bd) {
                best = Some((i, j, d));
            }
        }
    }
    let (i, j, distance) = best?;
    let (e1, e2) = (&me[i], &se[j]);
    let position = moving.pos + (e2.midpoint - e1.midpoint) + e2.normal * cfg.separation_push;
    trace!(
        moving = %moving.id,
        stationary = %stationary.id,
        moving_edge = i,
        stationary_edge = j,
        distance,
        "snap pair"
    );
    Some(Snap {
        position,
        distance,
        moving_edge: i,
        stationary_edge: j,
    })
}

/// Nearest snap of `moving` against every other tile in `tiles`.
///
/// Skips `moving` itself and its own mirrors, which move in lockstep with it.
pub fn resolve_among<'a, I>(moving: &Tile, tiles: I, cfg: &SnapCfg) -> Option<SnapTarget>
where
    I: IntoIterator<Item = &'a Tile>,
{
    let mut best: Option<SnapTarget> = None;
    for other in tiles {
        if other.id == moving.id || other.mirror_of == Some(moving.id) {
            continue;
        }
        let Some(snap) = resolve(moving, other, cfg) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| snap.distance < b.snap.distance) {
            best = Some(SnapTarget {
                target: other.id,
                snap,
            });
        }
    }
    if let Some(b) = &best {
        debug!(moving = %moving.id, target = %b.target, distance = b.snap.distance, "snapped");
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ShapeKind;
    use crate::compat::is_compatible;
    use nalgebra::vector;

    fn tile(id: u64, shape: ShapeKind, x: f64, y: f64) -> Tile {
        Tile::new(TileId(id), shape, vector![x, y])
    }

    #[test]
    fn adjacent_squares_snap_right_to_left() {
        let cfg = SnapCfg::default();
        let a = tile(1, ShapeKind::Square, 300.0, 300.0);
        let b = tile(2, ShapeKind::Square, 360.0, 300.0);
        let snap = resolve(&a, &b, &cfg).expect("squares 10 apart snap");
        assert_eq!((snap.moving_edge, snap.stationary_edge), (1, 3));
        assert!((snap.distance - 10.0).abs() < 1e-9);
        // +10 to close the gap, -1 push along b's left normal
        assert!((snap.position.x - 309.0).abs() < 1e-9);
        assert!((snap.position.y - 300.0).abs() < 1e-9);
        assert!((snap.position.x - 310.0).abs() <= 1.0 + 1e-9);
    }

    #[test]
    fn equal_pairs_keep_first_in_emission_order() {
        let cfg = SnapCfg::default();
        // Diagonal neighbor: right→left and bottom→top both sit √1300 apart.
        let a = tile(1, ShapeKind::Square, 0.0, 0.0);
        let b = tile(2, ShapeKind::Square, 30.0, 30.0);
        let (me, se) = (edges_of(&a), edges_of(&b));
        assert!(is_compatible(&me[1], &se[3], &cfg));
        assert!(is_compatible(&me[2], &se[0], &cfg));
        assert_eq!(me[1].midpoint_distance(&se[3]), me[2].midpoint_distance(&se[0]));

        let snap = resolve(&a, &b, &cfg).expect("diagonal squares snap");
        assert_eq!((snap.moving_edge, snap.stationary_edge), (1, 3));
        assert!((snap.distance - 1300f64.sqrt()).abs() < 1e-12);
        assert!((snap.position - vector![-21.0, 30.0]).norm() < 1e-9);
    }

    #[test]
    fn far_apart_tiles_do_not_snap() {
        let cfg = SnapCfg::default();
        let a = tile(1, ShapeKind::Square, 0.0, 0.0);
        let b = tile(2, ShapeKind::Square, 300.0, 0.0);
        assert!(resolve(&a, &b, &cfg).is_none());
    }

    #[test]
    fn mismatched_sides_do_not_snap() {
        let cfg = SnapCfg::default();
        let a = tile(1, ShapeKind::Square, 0.0, 0.0);
        let b = tile(2, ShapeKind::Diamond, 60.0, 0.0);
        assert!(resolve(&a, &b, &cfg).is_none());
    }

    #[test]
    fn snapped_tile_is_aligned() {
        let cfg = SnapCfg::default();
        let a = tile(1, ShapeKind::Hexagon, 100.0, 100.0).with_rotation(4.0);
        let b = tile(2, ShapeKind::Hexagon, 185.0, 140.0);
        let snap = resolve(&a, &b, &cfg).expect("hexagons snap");
        let moved = a.moved_to(snap.position);
        let (me, se) = (edges_of(&moved), edges_of(&b));
        let (e1, e2) = (&me[snap.moving_edge], &se[snap.stationary_edge]);
        assert!(e1.midpoint_distance(e2) <= 1.5);
        assert!(is_compatible(e1, e2, &cfg));
    }

    #[test]
    fn contest_picks_nearest_and_skips_own_mirrors() {
        let cfg = SnapCfg::default();
        let moving = tile(1, ShapeKind::Square, 300.0, 300.0);
        let near = tile(2, ShapeKind::Square, 300.0, 355.0); // 5 below
        let farther = tile(3, ShapeKind::Square, 360.0, 300.0); // 10 right
        let mut own_mirror = tile(4, ShapeKind::Square, 249.0, 300.0); // 1 left
        own_mirror.mirror_of = Some(moving.id);
        let tiles = vec![moving.clone(), farther, own_mirror, near];
        let won = resolve_among(&moving, &tiles, &cfg).expect("a neighbor snaps");
        assert_eq!(won.target, TileId(2));
        // +5 down, then 1 back up along near's top normal
        assert!((won.snap.position - vector![300.0, 304.0]).norm() < 1e-9);
    }

    #[test]
    fn contest_ties_keep_first_tile() {
        let cfg = SnapCfg::default();
        let moving = tile(1, ShapeKind::Square, 300.0, 300.0);
        let right = tile(2, ShapeKind::Square, 360.0, 300.0);
        let left = tile(3, ShapeKind::Square, 240.0, 300.0);
        let won = resolve_among(&moving, [&right, &left], &cfg).unwrap();
        assert_eq!(won.target, TileId(2));
        let won = resolve_among(&moving, [&left, &right], &cfg).unwrap();
        assert_eq!(won.target, TileId(3));
        assert!(resolve_among(&moving, [&moving], &cfg).is_none());
    }
}
