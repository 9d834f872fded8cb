//! Four-point planar fit for sign mockups.
//!
//! Given the half-extents of a sign's source rectangle and four points picked
//! on a photograph, this crate finds the affine map that best carries the
//! rectangle onto the picked quadrilateral and reduces it to a pose a scene
//! node can apply directly (translation, in-plane rotation, uniform scale).
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! render anything, hold any state between calls, or know how display pixels
//! relate to the scene: the caller passes that mapping in.
//!
//! ```
//! use nalgebra::Point2;
//! use signfit_core::{fit, SourceRect};
//!
//! # fn main() -> Result<(), signfit_core::FitError> {
//! let source = SourceRect::new(2.0, 1.0)?;
//! let picked = [
//!     Point2::new(12.0, 11.0),
//!     Point2::new(8.0, 9.0),
//!     Point2::new(12.0, 9.0),
//!     Point2::new(8.0, 11.0),
//! ];
//! let pose = fit(&source, &picked, |p| p)?;
//! assert!((pose.position.x - 10.0).abs() < 1e-9);
//! assert!((pose.position.y - 10.0).abs() < 1e-9);
//! assert!(pose.rotation_z.abs() < 1e-9);
//! # Ok(())
//! # }
//! ```

mod affine;
mod error;
mod fit;
mod order;
mod picker;
mod types;

pub use affine::{decompose_affine_to_trs, solve_affine};
pub use error::FitError;
pub use fit::{fit, fit_detailed, fit_with_params, FitParams, FitResult, DEFAULT_MIN_SCALE};
pub use order::order_quad;
pub use picker::QuadPicker;
pub use types::{AffineParams, Pose, Quad, SourceRect};
