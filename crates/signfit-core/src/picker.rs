use nalgebra::Point2;

use crate::{fit_detailed, FitError, FitParams, FitResult, SourceRect};

/// Clicked points awaiting a fit, capped at four.
///
/// Owned by the caller; the solver itself keeps no state. Refitting on every
/// click once the picker is complete, and once more on apply, is just calling
/// [`QuadPicker::try_fit`] again.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct QuadPicker {
    points: Vec<Point2<f64>>,
}

impl QuadPicker {
    pub const CAPACITY: usize = 4;

    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(Self::CAPACITY),
        }
    }

    /// Record a click. Returns `false` and ignores the point once four are held.
    pub fn push(&mut self, p: Point2<f64>) -> bool {
        if self.is_complete() {
            return false;
        }
        self.points.push(p);
        true
    }

    /// Drop the most recent click.
    pub fn pop(&mut self) -> Option<Point2<f64>> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.points.len() == Self::CAPACITY
    }

    /// Fit with the current clicks, or report how many are still missing.
    pub fn try_fit<F>(
        &self,
        source: &SourceRect,
        screen_to_world: F,
        params: &FitParams,
    ) -> Result<FitResult, FitError>
    where
        F: Fn(Point2<f64>) -> Point2<f64>,
    {
        fit_detailed(source, &self.points, screen_to_world, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_at_four_clicks() {
        let mut picker = QuadPicker::new();
        for i in 0..4 {
            assert!(picker.push(Point2::new(i as f64, 0.0)));
        }
        assert!(picker.is_complete());
        assert!(!picker.push(Point2::new(9.0, 9.0)));
        assert_eq!(picker.len(), 4);
        assert_eq!(picker.points()[3], Point2::new(3.0, 0.0));
    }

    #[test]
    fn incomplete_picker_does_not_fit() {
        let mut picker = QuadPicker::new();
        picker.push(Point2::new(0.0, 0.0));
        picker.push(Point2::new(1.0, 0.0));
        picker.push(Point2::new(1.0, 1.0));
        let source = SourceRect::new(1.0, 1.0).expect("valid");
        let err = picker
            .try_fit(&source, |p| p, &FitParams::default())
            .expect_err("three points");
        assert_eq!(err, FitError::InsufficientPoints { got: 3 });

        assert!(picker.push(Point2::new(0.0, 1.0)));
        assert!(picker.try_fit(&source, |p| p, &FitParams::default()).is_ok());

        assert_eq!(picker.pop(), Some(Point2::new(0.0, 1.0)));
        picker.clear();
        assert!(picker.is_empty());
    }
}
