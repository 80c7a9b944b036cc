//! 2D affine maps `x ↦ M x + t` used to place catalog shapes in the world.

use nalgebra::{Matrix2, Vector2};

use crate::Point;

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    /// Counter-clockwise rotation (in the math sense) by `degrees` about the origin.
    #[inline]
    pub fn rotation_deg(degrees: f64) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self {
            m: Matrix2::new(c, -s, s, c),
            t: Vector2::zeros(),
        }
    }

    /// Rotate by `degrees`, then translate by `pos`.
    #[inline]
    pub fn placement(degrees: f64, pos: Point) -> Self {
        Self {
            t: pos,
            ..Self::rotation_deg(degrees)
        }
    }

    #[inline]
    pub fn apply(&self, p: Point) -> Point {
        self.m * p + self.t
    }
}
