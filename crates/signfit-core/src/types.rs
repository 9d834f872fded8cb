use nalgebra::{Point2, Rotation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::FitError;

/// Four points, either as picked or in canonical `[TL, TR, BR, BL]` order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad(pub [Point2<f64>; 4]);

impl Quad {
    pub fn new(corners: [Point2<f64>; 4]) -> Self {
        Self(corners)
    }

    /// Take exactly four points from `points`.
    pub fn from_slice(points: &[Point2<f64>]) -> Result<Self, FitError> {
        match points {
            [p0, p1, p2, p3] => Ok(Self([*p0, *p1, *p2, *p3])),
            _ if points.len() < 4 => Err(FitError::InsufficientPoints { got: points.len() }),
            _ => Err(FitError::TooManyPoints { got: points.len() }),
        }
    }

    #[inline]
    pub fn corners(&self) -> &[Point2<f64>; 4] {
        &self.0
    }

    /// Arithmetic mean of the four corners.
    pub fn centroid(&self) -> Point2<f64> {
        let sum = self
            .0
            .iter()
            .fold(Vector2::zeros(), |acc: Vector2<f64>, p| acc + p.coords);
        Point2::from(sum / 4.0)
    }

    /// Map every corner through `f`, keeping the order.
    pub fn map(&self, f: impl FnMut(Point2<f64>) -> Point2<f64>) -> Self {
        Self(self.0.map(f))
    }
}

/// Source rectangle of the sign, centred at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceRect {
    pub half_width: f64,
    pub half_height: f64,
}

impl SourceRect {
    pub fn new(half_width: f64, half_height: f64) -> Result<Self, FitError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !valid(half_width) || !valid(half_height) {
            return Err(FitError::InvalidSourceRect {
                half_width,
                half_height,
            });
        }
        Ok(Self {
            half_width,
            half_height,
        })
    }

    /// Rectangle of a `width` x `height` layout box grown by `padding` on every side.
    pub fn from_size(width: f64, height: f64, padding: f64) -> Result<Self, FitError> {
        Self::new(0.5 * width + padding, 0.5 * height + padding)
    }

    /// Corners in canonical `[TL, TR, BR, BL]` order.
    ///
    /// The y axis points down, matching the screen convention that
    /// [`crate::order_quad`] assumes when it picks the top-left start corner.
    pub fn corners(&self) -> Quad {
        let (hw, hh) = (self.half_width, self.half_height);
        Quad([
            Point2::new(-hw, -hh),
            Point2::new(hw, -hh),
            Point2::new(hw, hh),
            Point2::new(-hw, hh),
        ])
    }
}

/// 2D affine map `X = a*x + b*y + c`, `Y = d*x + e*y + f`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AffineParams {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineParams {
    pub const IDENTITY: AffineParams = AffineParams {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::new(
            self.a * p.x + self.b * p.y + self.c,
            self.d * p.x + self.e * p.y + self.f,
        )
    }

    /// Determinant of the linear part. Negative when the map mirrors.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.e - self.b * self.d
    }

    /// Root-mean-square distance between `apply(src[k])` and `dst[k]`.
    pub fn residual_rms(&self, src: &Quad, dst: &Quad) -> f64 {
        let sum_sq: f64 = src
            .0
            .iter()
            .zip(dst.0.iter())
            .map(|(s, d)| (self.apply(*s) - *d).norm_squared())
            .sum();
        (sum_sq / 4.0).sqrt()
    }
}

/// Rigid-plus-uniform-scale transform to apply to the sign's root node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Point2<f64>,
    /// In-plane rotation in radians.
    pub rotation_z: f64,
    /// Lengths of the transformed x and y basis vectors.
    pub scale: Vector2<f64>,
    /// Mean of `scale.x` and `scale.y`, floored at the fit's `min_scale`.
    pub uniform_scale: f64,
}

impl Pose {
    pub fn identity() -> Self {
        Self {
            position: Point2::origin(),
            rotation_z: 0.0,
            scale: Vector2::new(1.0, 1.0),
            uniform_scale: 1.0,
        }
    }

    /// The transform this pose applies, as affine parameters. Shear and
    /// anisotropic scale are gone at this point.
    pub fn to_affine(&self) -> AffineParams {
        let m = Rotation2::new(self.rotation_z).into_inner() * self.uniform_scale;
        AffineParams {
            a: m[(0, 0)],
            b: m[(0, 1)],
            c: self.position.x,
            d: m[(1, 0)],
            e: m[(1, 1)],
            f: self.position.y,
        }
    }

    #[inline]
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        self.to_affine().apply(p)
    }
}
