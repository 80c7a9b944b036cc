//! Tolerances and canvas defaults for snapping and suggestions.
//!
//! Policy
//! - Every threshold used by the geometry lives here as a named constant with
//!   its geometric meaning. Algorithms read them through `SnapCfg` and
//!   `SuggestCfg`, never as inline literals.
//! - Shapes are drawn at a fixed scale, so all distances are absolute world
//!   units rather than relative tolerances.

use std::fmt;

use nalgebra::Vector2;

use crate::Point;

/// Maximum absolute difference of two edge lengths that may still fuse.
pub const MAX_LENGTH_DELTA: f64 = 2.0;
/// Maximum midpoint-to-midpoint distance of two fusable edges.
pub const MAX_EDGE_GAP: f64 = 40.0;
/// Normals must satisfy `n_a · n_b <= -MIN_OPPOSITION_COS` (≈154° apart or more).
pub const MIN_OPPOSITION_COS: f64 = 0.9;
/// Segments must satisfy `|d_a · d_b| >= MIN_PARALLEL_COS`.
pub const MIN_PARALLEL_COS: f64 = 0.9;
/// Push along the stationary edge normal after a snap, keeps edges from coinciding.
pub const SEPARATION_PUSH: f64 = 1.0;
/// A suggestion closer than this to any tile center counts as occupied.
pub const OCCUPANCY_CLEARANCE: f64 = 50.0;
/// Half-width of an orientation band around 0°/60°/90°/120°, in degrees.
pub const BAND_TOLERANCE_DEG: f64 = 15.0;
/// Edges shorter than this are degenerate and skipped.
pub const DEGENERATE_EDGE_EPS: f64 = 1e-9;
/// Default canvas working area (world units).
pub const CANVAS_WIDTH: f64 = 800.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Edge-fusion tolerances used by `compat` and `snap`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapCfg {
    pub max_length_delta: f64,
    pub max_edge_gap: f64,
    pub min_opposition_cos: f64,
    pub min_parallel_cos: f64,
    pub separation_push: f64,
}

impl Default for SnapCfg {
    fn default() -> Self {
        Self {
            max_length_delta: MAX_LENGTH_DELTA,
            max_edge_gap: MAX_EDGE_GAP,
            min_opposition_cos: MIN_OPPOSITION_COS,
            min_parallel_cos: MIN_PARALLEL_COS,
            separation_push: SEPARATION_PUSH,
        }
    }
}

impl SnapCfg {
    pub fn validate(&self) -> Result<(), CfgError> {
        non_negative("max_length_delta", self.max_length_delta)?;
        non_negative("max_edge_gap", self.max_edge_gap)?;
        non_negative("separation_push", self.separation_push)?;
        cosine("min_opposition_cos", self.min_opposition_cos)?;
        cosine("min_parallel_cos", self.min_parallel_cos)?;
        Ok(())
    }
}

/// Axis-aligned working area of the canvas (inclusive on all sides).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Point,
    pub max: Point,
}

impl Bounds2 {
    #[inline]
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Canvas of the given size anchored at the origin.
    #[inline]
    pub fn canvas(width: f64, height: f64) -> Self {
        Self::new(Vector2::zeros(), Vector2::new(width, height))
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn center(&self) -> Point {
        (self.min + self.max) * 0.5
    }
}

impl Default for Bounds2 {
    fn default() -> Self {
        Self::canvas(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

/// Suggestion synthesis configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SuggestCfg {
    pub bounds: Bounds2,
    pub clearance: f64,
    pub band_tolerance_deg: f64,
}

impl Default for SuggestCfg {
    fn default() -> Self {
        Self {
            bounds: Bounds2::default(),
            clearance: OCCUPANCY_CLEARANCE,
            band_tolerance_deg: BAND_TOLERANCE_DEG,
        }
    }
}

impl SuggestCfg {
    pub fn validate(&self) -> Result<(), CfgError> {
        non_negative("clearance", self.clearance)?;
        let tol = self.band_tolerance_deg;
        if !tol.is_finite() || !(0.0..=90.0).contains(&tol) {
            return Err(CfgError::OutOfRange {
                field: "band_tolerance_deg",
                value: tol,
            });
        }
        let b = self.bounds;
        let coords = [b.min.x, b.min.y, b.max.x, b.max.y];
        if coords.iter().any(|c| !c.is_finite()) || b.min.x > b.max.x || b.min.y > b.max.y {
            return Err(CfgError::EmptyBounds);
        }
        Ok(())
    }
}

/// Rejected configuration values.
#[derive(Clone, Debug, PartialEq)]
pub enum CfgError {
    /// A distance was negative or not finite.
    NotADistance { field: &'static str, value: f64 },
    /// A value fell outside its admissible range.
    OutOfRange { field: &'static str, value: f64 },
    /// Canvas bounds are inverted or not finite.
    EmptyBounds,
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CfgError::NotADistance { field, value } => {
                write!(f, "{field} must be a finite, non-negative distance (got {value})")
            }
            CfgError::OutOfRange { field, value } => {
                write!(f, "{field} is out of range (got {value})")
            }
            CfgError::EmptyBounds => write!(f, "canvas bounds are empty or not finite"),
        }
    }
}

impl std::error::Error for CfgError {}

fn non_negative(field: &'static str, value: f64) -> Result<(), CfgError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CfgError::NotADistance { field, value })
    }
}

fn cosine(field: &'static str, value: f64) -> Result<(), CfgError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CfgError::OutOfRange { field, value })
    }
}
