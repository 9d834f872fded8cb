//! Least-squares affine fit and its reduction to a pose.

use log::warn;
use nalgebra::{Matrix6, Point2, SMatrix, SVector, Vector2, Vector6};

use crate::{AffineParams, Pose, Quad};

/// Fit `{a,b,c,d,e,f}` mapping `src[k]` onto `dst[k]` in the least-squares sense.
///
/// Four correspondences give 8 equations in 6 unknowns. A general quad is not
/// an affine image of a rectangle, so the non-affine part (trapezoidal
/// foreshortening) is left as residual; see [`AffineParams::residual_rms`].
///
/// The source points are centred and scaled to a mean distance of `sqrt(2)`
/// first, so the result does not depend on the source's units. The normal
/// equations are then inverted with Gauss–Jordan elimination and partial
/// pivoting. A pivot smaller than `pivot_epsilon` is replaced by
/// `±pivot_epsilon`, so singular input returns an unreliable map instead of
/// failing.
pub fn solve_affine(src: &Quad, dst: &Quad, pivot_epsilon: f64) -> AffineParams {
    let (src_n, scale, centroid) = normalize_source(src);

    // Unknowns: [a b c d e f]
    // For each correspondence (x,y)->(u,v):
    // a x + b y + c = u
    // d x + e y + f = v
    let mut a = SMatrix::<f64, 8, 6>::zeros();
    let mut b = SVector::<f64, 8>::zeros();

    for (k, (s, t)) in src_n.0.iter().zip(dst.0.iter()).enumerate() {
        let r0 = 2 * k;
        a[(r0, 0)] = s.x;
        a[(r0, 1)] = s.y;
        a[(r0, 2)] = 1.0;
        b[r0] = t.x;

        let r1 = 2 * k + 1;
        a[(r1, 3)] = s.x;
        a[(r1, 4)] = s.y;
        a[(r1, 5)] = 1.0;
        b[r1] = t.y;
    }

    let at = a.transpose();
    let ata: Matrix6<f64> = at * a;
    let atb: Vector6<f64> = at * b;

    let (inv, clamped_pivots) = gauss_jordan_inverse(&ata, pivot_epsilon);
    if clamped_pivots > 0 {
        warn!("normal equations are singular: {clamped_pivots} pivot(s) clamped to {pivot_epsilon:e}");
    }

    let x = inv * atb;

    // Undo the normalization: x_n = scale * (x - centroid)
    let (a, b, d, e) = (x[0] * scale, x[1] * scale, x[3] * scale, x[4] * scale);
    AffineParams {
        a,
        b,
        c: x[2] - a * centroid.x - b * centroid.y,
        d,
        e,
        f: x[5] - d * centroid.x - e * centroid.y,
    }
}

/// Translate `src` to its centroid and scale it to a mean distance of `sqrt(2)`.
///
/// Returns the normalized quad, the scale and the centroid. A quad with all
/// corners on its centroid is only translated.
fn normalize_source(src: &Quad) -> (Quad, f64, Point2<f64>) {
    let c = src.centroid();
    let mean_dist = src.0.iter().map(|p| (*p - c).norm()).sum::<f64>() / 4.0;
    let scale = if mean_dist > 0.0 && mean_dist.is_finite() {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    let normalized = src.map(|p| Point2::from((p - c) * scale));
    (normalized, scale, c)
}

/// Invert `m` by Gauss–Jordan elimination with partial pivoting.
///
/// Returns the inverse and how many pivots fell below `pivot_epsilon`.
fn gauss_jordan_inverse(m: &Matrix6<f64>, pivot_epsilon: f64) -> (Matrix6<f64>, usize) {
    const N: usize = 6;
    let mut a = *m;
    let mut inv = Matrix6::<f64>::identity();
    let mut clamped = 0;

    for col in 0..N {
        let mut pivot_row = col;
        for r in col + 1..N {
            if a[(r, col)].abs() > a[(pivot_row, col)].abs() {
                pivot_row = r;
            }
        }
        if pivot_row != col {
            a.swap_rows(col, pivot_row);
            inv.swap_rows(col, pivot_row);
        }

        let mut pivot = a[(col, col)];
        if pivot.abs() < pivot_epsilon {
            pivot = pivot_epsilon.copysign(pivot);
            clamped += 1;
        }

        for j in 0..N {
            a[(col, j)] /= pivot;
            inv[(col, j)] /= pivot;
        }

        for r in 0..N {
            if r == col {
                continue;
            }
            let factor = a[(r, col)];
            if factor == 0.0 {
                continue;
            }
            for j in 0..N {
                let (pa, pi) = (a[(col, j)], inv[(col, j)]);
                a[(r, j)] -= factor * pa;
                inv[(r, j)] -= factor * pi;
            }
        }
    }

    (inv, clamped)
}

/// Reduce an affine map to translation, rotation and scale.
///
/// - `position = (c, f)`
/// - `scale = (|(a, d)|, |(b, e)|)`
/// - `rotation_z = atan2(d, a)`, the angle of the mapped x axis
/// - `uniform_scale = max(mean(scale), min_scale)`
///
/// Shear, and any mirroring, are dropped: the result is meant for a sign that
/// must stay a rectangle, not for a general warp.
pub fn decompose_affine_to_trs(affine: &AffineParams, min_scale: f64) -> Pose {
    let scale = Vector2::new(affine.a.hypot(affine.d), affine.b.hypot(affine.e));
    let rotation_z = affine.d.atan2(affine.a);

    let mean = 0.5 * (scale.x + scale.y);
    let uniform_scale = mean.max(min_scale);
    if mean.is_nan() || mean < min_scale {
        warn!("uniform scale {mean:.4} floored to {min_scale}");
    }

    Pose {
        position: Point2::new(affine.c, affine.f),
        rotation_z,
        scale,
        uniform_scale,
    }
}
