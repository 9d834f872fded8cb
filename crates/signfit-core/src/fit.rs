use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{
    decompose_affine_to_trs, order_quad, solve_affine, AffineParams, FitError, Pose, Quad,
    SourceRect,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Floor applied to the uniform scale so a degenerate pick cannot make the sign vanish.
pub const DEFAULT_MIN_SCALE: f64 = 0.05;

/// Tunables for a fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    /// Lower bound of [`Pose::uniform_scale`].
    pub min_scale: f64,
    /// Magnitude substituted for a Gauss–Jordan pivot smaller than this.
    pub pivot_epsilon: f64,
}

impl FitParams {
    /// Check that both fields are finite and positive.
    pub fn validate(&self) -> Result<(), FitError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.min_scale) && ok(self.pivot_epsilon) {
            Ok(())
        } else {
            Err(FitError::InvalidParams {
                min_scale: self.min_scale,
                pivot_epsilon: self.pivot_epsilon,
            })
        }
    }
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            min_scale: DEFAULT_MIN_SCALE,
            pivot_epsilon: 1e-12,
        }
    }
}

/// Everything a fit computed, for callers that want more than the pose.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub pose: Pose,
    pub affine: AffineParams,
    /// Picked points in canonical `[TL, TR, BR, BL]` order, display space.
    pub ordered: Quad,
    /// `ordered` mapped through the caller's screen-to-world function.
    pub target: Quad,
    pub residual_rms: f64,
}

/// Fit the source rectangle onto four picked points with default [`FitParams`].
///
/// `screen_to_world` maps display pixels into the space the pose is applied
/// in. It has to be affine for the composed result to stay meaningful.
pub fn fit<F>(
    source: &SourceRect,
    picked: &[Point2<f64>],
    screen_to_world: F,
) -> Result<Pose, FitError>
where
    F: Fn(Point2<f64>) -> Point2<f64>,
{
    fit_with_params(source, picked, screen_to_world, &FitParams::default())
}

pub fn fit_with_params<F>(
    source: &SourceRect,
    picked: &[Point2<f64>],
    screen_to_world: F,
    params: &FitParams,
) -> Result<Pose, FitError>
where
    F: Fn(Point2<f64>) -> Point2<f64>,
{
    fit_detailed(source, picked, screen_to_world, params).map(|r| r.pose)
}

/// Order, map, solve and decompose.
///
/// Fails when `picked` does not hold exactly four points or `params` is
/// invalid. Degenerate geometry still yields a pose.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(screen_to_world), fields(num_points = picked.len()))
)]
pub fn fit_detailed<F>(
    source: &SourceRect,
    picked: &[Point2<f64>],
    screen_to_world: F,
    params: &FitParams,
) -> Result<FitResult, FitError>
where
    F: Fn(Point2<f64>) -> Point2<f64>,
{
    params.validate()?;
    let picked = Quad::from_slice(picked)?;
    let ordered = order_quad(&picked);
    let target = ordered.map(&screen_to_world);
    let src = source.corners();

    let affine = solve_affine(&src, &target, params.pivot_epsilon);
    let pose = decompose_affine_to_trs(&affine, params.min_scale);
    let residual_rms = affine.residual_rms(&src, &target);

    debug!(
        "fit: det={:.4} rot={:.4} scale=({:.4},{:.4}) residual_rms={:.4}",
        affine.determinant(),
        pose.rotation_z,
        pose.scale.x,
        pose.scale.y,
        residual_rms
    );

    Ok(FitResult {
        pose,
        affine,
        ordered,
        target,
        residual_rms,
    })
}
