//! Geometry core for snapping polygon tiles on a 2D canvas.
//!
//! Pieces, leaf first:
//! - `catalog`: vertex loops and center-to-edge distances per `ShapeKind`.
//! - `edge`: world-space edges with outward normals.
//! - `compat`: may two edges fuse.
//! - `snap`: where a released tile lands.
//! - `symmetry`: reflected companion tiles.
//! - `suggest`: proposed placements along exposed edges.
//!
//! Every operation is a pure function over caller-owned tiles. Nothing is
//! cached or retained between calls, so the functions may be called at any
//! rate and from concurrent readers.
//!
//! Canvas convention: y grows downward; rotations are degrees.

pub mod affine;
pub mod api;
pub mod catalog;
pub mod cfg;
pub mod compat;
pub mod edge;
pub mod rand;
pub mod snap;
pub mod suggest;
pub mod symmetry;
pub mod tile;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canvas coordinate, used both as position and as free vector.
pub type Point = nalgebra::Vector2<f64>;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::catalog::{ShapeKind, ShapeSpec};
    pub use crate::cfg::{Bounds2, CfgError, SnapCfg, SuggestCfg};
    pub use crate::compat::{compatibility, is_compatible, Compat};
    pub use crate::edge::{edges_of, Edge};
    pub use crate::rand::{draw_scene, ReplayToken, SceneCfg};
    pub use crate::snap::{resolve, resolve_among, Snap, SnapTarget};
    pub use crate::suggest::{synthesize, EdgeBand, Suggestion};
    pub use crate::symmetry::{
        infer_symmetry, mirrors_of, regenerate_all, regenerate_mirrors, Reflection, SymmetryMode,
    };
    pub use crate::tile::{palette_color, Tile, TileId, TileIds};
    pub use crate::Point;
    pub use nalgebra::Vector2;
}
