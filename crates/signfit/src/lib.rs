//! High-level facade for the `signfit` workspace.
//!
//! This crate provides:
//! - re-exports of the pure solver in [`signfit_core`]
//! - [`PhotoPlane`], the pixel-to-scene mapping for a photo shown on a plane
//!   of fixed width
//! - the stderr logger (and, with feature `tracing`, a `tracing` subscriber)
//!   that the binary installs
//! - JSON request/report helpers ([`FitRequest`], [`FitReport`]) used by the
//!   `signfit` command-line tool (feature `cli`)
//!
//! ## Quickstart
//!
//! ```
//! use nalgebra::Point2;
//! use signfit::{fit, PhotoPlane, SourceRect};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let photo = PhotoPlane::new(1600.0, 1200.0, 10.0)?;
//! let source = SourceRect::from_size(3.2, 0.9, 0.1)?;
//! let clicks = [
//!     Point2::new(420.0, 310.0),
//!     Point2::new(1180.0, 290.0),
//!     Point2::new(1190.0, 520.0),
//!     Point2::new(410.0, 540.0),
//! ];
//! let pose = fit(&source, &clicks, |p| photo.to_world(p))?;
//! println!("place sign at {:?}, scale {:.3}", pose.position, pose.uniform_scale);
//! # Ok(())
//! # }
//! ```

mod io;
mod logger;
mod plane;

pub use signfit_core as core;

pub use io::{FitReport, FitRequest, SignfitIoError, SourceSpec};
#[cfg(feature = "tracing")]
pub use logger::init_tracing;
pub use logger::init_logging;
pub use plane::{PhotoPlane, PhotoPlaneError};
pub use signfit_core::{
    decompose_affine_to_trs, fit, fit_detailed, fit_with_params, order_quad, solve_affine,
    AffineParams, FitError, FitParams, FitResult, Pose, Quad, QuadPicker, SourceRect,
};
