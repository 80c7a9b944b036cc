//! Edge compatibility: may two edges fuse into a shared side?
//!
//! Four gates, checked in order and short-circuiting:
//! 1. lengths match within `max_length_delta`;
//! 2. midpoints lie within `max_edge_gap`;
//! 3. outward normals are nearly opposite (`n_a·n_b <= -min_opposition_cos`);
//! 4. the segments themselves are nearly parallel (`|d_a·d_b| >= min_parallel_cos`).
//!
//! Gate 3 alone admits edges that face each other at an angle; gate 4 rejects
//! those corner-to-corner near misses. Every gate is symmetric in its
//! arguments, so the predicate is too.

use crate::cfg::SnapCfg;
use crate::edge::Edge;

/// Outcome of a compatibility check: the first failing gate, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Compat {
    Compatible,
    LengthMismatch,
    TooFar,
    NotOpposed,
    NotParallel,
}

impl Compat {
    #[inline]
    pub fn is_compatible(self) -> bool {
        self == Compat::Compatible
    }
}

pub fn compatibility(a: &Edge, b: &Edge, cfg: &SnapCfg) -> Compat {
    if (a.length - b.length).abs() > cfg.max_length_delta {
        return Compat::LengthMismatch;
    }
    if a.midpoint_distance(b) > cfg.max_edge_gap {
        return Compat::TooFar;
    }
    if a.normal.dot(&b.normal) > -cfg.min_opposition_cos {
        return Compat::NotOpposed;
    }
    if a.direction().dot(&b.direction()).abs() < cfg.min_parallel_cos {
        return Compat::NotParallel;
    }
    Compat::Compatible
}

#[inline]
pub fn is_compatible(a: &Edge, b: &Edge, cfg: &SnapCfg) -> bool {
    compatibility(a, b, cfg).is_compatible()
}
