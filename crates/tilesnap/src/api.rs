//! The five operations the composing application calls, with default tolerances.
//!
//! Each is a pure function of its inputs. Callers that tune tolerances use the
//! module functions (`snap::resolve`, `suggest::synthesize`, ...) directly with
//! their own `SnapCfg`/`SuggestCfg`.

pub use crate::cfg::{Bounds2, SnapCfg, SuggestCfg};
pub use crate::edge::{edges_of, Edge};
pub use crate::snap::{resolve_among, Snap, SnapTarget};
pub use crate::suggest::Suggestion;
pub use crate::symmetry::{mirrors_of, regenerate_all, regenerate_mirrors, SymmetryMode};
pub use crate::tile::{Tile, TileId, TileIds};

/// Whether two edges may fuse, under default tolerances.
pub fn compatible(a: &Edge, b: &Edge) -> bool {
    crate::compat::is_compatible(a, b, &SnapCfg::default())
}

/// Snap of `moving` onto `stationary`; `None` means it cannot snap.
pub fn resolve_snap(moving: &Tile, stationary: &Tile) -> Option<Snap> {
    crate::snap::resolve(moving, stationary, &SnapCfg::default())
}

/// Suggested placements on the default canvas; empty when `enabled` is false.
pub fn suggest(tiles: &[Tile], enabled: bool) -> Vec<Suggestion> {
    crate::suggest::synthesize(tiles, enabled, &SuggestCfg::default())
}
