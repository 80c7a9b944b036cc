//! Shape catalog: the single source of truth for tile geometry.
//!
//! Each `ShapeKind` maps to one `ShapeSpec` holding its local vertex loop
//! (centered on the origin, clockwise on a y-down canvas for every kind) and
//! the center-to-edge distance used when placing suggestions next to an edge.
//! Extraction, snapping and suggestions all read this table; nothing else
//! hard-codes vertex coordinates.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

use crate::Point;

/// Closed set of supported polygon kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Triangle,
    Square,
    Hexagon,
    Diamond,
}

/// Static geometry of one shape kind.
#[derive(Debug)]
pub struct ShapeSpec {
    pub kind: ShapeKind,
    pub name: &'static str,
    /// Local-space vertex loop, origin-centered.
    pub vertices: &'static [[f64; 2]],
    /// Distance from the shape's center to the edge it is placed against.
    pub center_to_edge: f64,
}

// 25·√3, the hexagon apothem.
const HEX_H: f64 = 43.301_270_189_221_93;

static CATALOG: [ShapeSpec; 4] = [
    ShapeSpec {
        kind: ShapeKind::Triangle,
        name: "triangle",
        vertices: &[[0.0, -25.0], [25.0, 20.0], [-25.0, 20.0]],
        center_to_edge: 20.0,
    },
    ShapeSpec {
        kind: ShapeKind::Square,
        name: "square",
        vertices: &[[-25.0, -25.0], [25.0, -25.0], [25.0, 25.0], [-25.0, 25.0]],
        center_to_edge: 25.0,
    },
    ShapeSpec {
        kind: ShapeKind::Hexagon,
        name: "hexagon",
        vertices: &[
            [50.0, 0.0],
            [25.0, HEX_H],
            [-25.0, HEX_H],
            [-50.0, 0.0],
            [-25.0, -HEX_H],
            [25.0, -HEX_H],
        ],
        center_to_edge: HEX_H,
    },
    ShapeSpec {
        kind: ShapeKind::Diamond,
        name: "diamond",
        vertices: &[[0.0, -30.0], [30.0, 0.0], [0.0, 30.0], [-30.0, 0.0]],
        center_to_edge: 30.0,
    },
];

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Triangle,
        ShapeKind::Square,
        ShapeKind::Hexagon,
        ShapeKind::Diamond,
    ];

    #[inline]
    pub fn spec(self) -> &'static ShapeSpec {
        &CATALOG[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    #[inline]
    pub fn vertex_count(self) -> usize {
        self.spec().vertices.len()
    }

    #[inline]
    pub fn center_to_edge(self) -> f64 {
        self.spec().center_to_edge
    }

    /// Local-space vertices in catalog order.
    pub fn vertices(self) -> impl ExactSizeIterator<Item = Point> {
        self.spec()
            .vertices
            .iter()
            .map(|&[x, y]| Vector2::new(x, y))
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Shape name outside the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseShapeError(pub String);

impl fmt::Display for ParseShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown shape {:?} (expected triangle, square, hexagon or diamond)",
            self.0
        )
    }
}

impl std::error::Error for ParseShapeError {}

impl FromStr for ShapeKind {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        ShapeKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(key))
            .ok_or_else(|| ParseShapeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_keyed_by_kind() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn vertex_loops_match_catalog() {
        assert_eq!(ShapeKind::Triangle.vertex_count(), 3);
        assert_eq!(ShapeKind::Square.vertex_count(), 4);
        assert_eq!(ShapeKind::Hexagon.vertex_count(), 6);
        assert_eq!(ShapeKind::Diamond.vertex_count(), 4);

        // hexagon: radius 50, horizontal extent 100
        for v in ShapeKind::Hexagon.vertices() {
            assert!((v.norm() - 50.0).abs() < 1e-9);
        }
        let xs: Vec<f64> = ShapeKind::Hexagon.vertices().map(|v| v.x).collect();
        let width = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        assert!((width - 100.0).abs() < 1e-12);
        assert!((HEX_H - 25.0 * 3f64.sqrt()).abs() < 1e-12);

        // triangle: apex up (negative y on a y-down canvas), base 50, height 45
        let tri: Vec<Point> = ShapeKind::Triangle.vertices().collect();
        assert!(tri[0].y < tri[1].y);
        assert!(((tri[1].x - tri[2].x).abs() - 50.0).abs() < 1e-12);
        assert!(((tri[1].y - tri[0].y) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn winding_is_consistent() {
        // Shoelace sum has the same sign for every kind.
        for kind in ShapeKind::ALL {
            let v: Vec<Point> = kind.vertices().collect();
            let n = v.len();
            let area2: f64 = (0..n)
                .map(|i| {
                    let (p, q) = (v[i], v[(i + 1) % n]);
                    p.x * q.y - q.x * p.y
                })
                .sum();
            assert!(area2 > 0.0, "{kind} winds the other way");
        }
    }

    #[test]
    fn parse_names() {
        assert_eq!("hexagon".parse::<ShapeKind>(), Ok(ShapeKind::Hexagon));
        assert_eq!(" Square ".parse::<ShapeKind>(), Ok(ShapeKind::Square));
        let err = "pentagon".parse::<ShapeKind>().unwrap_err();
        assert!(err.to_string().contains("pentagon"));
        for kind in ShapeKind::ALL {
            assert_eq!(kind.to_string().parse::<ShapeKind>(), Ok(kind));
        }
    }
}
