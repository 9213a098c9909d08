//! Planar transform and point-set helpers for the shape model.
//!
//! - `Similarity2`: `x ↦ M x + t` where `M` is a scaled rotation.
//! - `rotation_matrix`, `centroid`: small building blocks shared by the
//!   model (anchor drift) and the renderer (per-viewport placement).

use nalgebra::{Matrix2, Vector2};

/// Counterclockwise rotation by `theta` radians in a y-up frame; clockwise
/// on screen, where y points down.
#[inline]
pub fn rotation_matrix(theta: f64) -> Matrix2<f64> {
    let (s, c) = theta.sin_cos();
    Matrix2::new(c, -s, s, c)
}

/// Vertex mean of a point set; the origin for an empty slice.
pub fn centroid(points: &[Vector2<f64>]) -> Vector2<f64> {
    if points.is_empty() {
        return Vector2::zeros();
    }
    let sum = points.iter().fold(Vector2::zeros(), |acc, p| acc + p);
    sum / points.len() as f64
}

/// 2D similarity map: `x ↦ M x + t` with `M = s·R(θ)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Similarity2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Similarity2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Scale, then rotate, then translate.
    #[inline]
    pub fn new(scale: f64, rotation: f64, t: Vector2<f64>) -> Self {
        Self {
            m: rotation_matrix(rotation) * scale,
            t,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }

    /// Composition `self ∘ other`.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    /// Inverse map; `None` for a zero scale.
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    /// Isotropic scale factor `s`.
    #[inline]
    pub fn scale(&self) -> f64 {
        self.m.determinant().abs().sqrt()
    }
}
