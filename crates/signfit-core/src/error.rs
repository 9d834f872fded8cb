/// Errors returned by the fit entry points.
///
/// Degenerate geometry is not an error: collinear or coincident picks still
/// produce a pose, with its uniform scale floored at [`crate::FitParams::min_scale`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("a fit needs exactly 4 points, only {got} picked")]
    InsufficientPoints { got: usize },
    #[error("a fit needs exactly 4 points, got {got}")]
    TooManyPoints { got: usize },
    #[error("invalid source rectangle (half_width={half_width}, half_height={half_height})")]
    InvalidSourceRect { half_width: f64, half_height: f64 },
    #[error("invalid fit params (min_scale={min_scale}, pivot_epsilon={pivot_epsilon})")]
    InvalidParams { min_scale: f64, pivot_epsilon: f64 },
}
