use nalgebra::Point2;
use serde::{Deserialize, Serialize};

fn default_plane_width() -> f64 {
    10.0
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("invalid photo plane (image {image_width}x{image_height}, plane width {plane_width})")]
pub struct PhotoPlaneError {
    pub image_width: f64,
    pub image_height: f64,
    pub plane_width: f64,
}

/// A photo of `image_width` x `image_height` pixels stretched over a plane
/// `plane_width` scene units wide, centred at the origin, y up.
///
/// The plane height follows the photo's aspect ratio.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoPlane {
    pub image_width: f64,
    pub image_height: f64,
    #[serde(default = "default_plane_width")]
    pub plane_width: f64,
}

impl PhotoPlane {
    pub fn new(
        image_width: f64,
        image_height: f64,
        plane_width: f64,
    ) -> Result<Self, PhotoPlaneError> {
        let plane = Self {
            image_width,
            image_height,
            plane_width,
        };
        plane.validate()?;
        Ok(plane)
    }

    /// Check that all dimensions are finite and positive.
    pub fn validate(&self) -> Result<(), PhotoPlaneError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.image_width) && ok(self.image_height) && ok(self.plane_width) {
            Ok(())
        } else {
            Err(PhotoPlaneError {
                image_width: self.image_width,
                image_height: self.image_height,
                plane_width: self.plane_width,
            })
        }
    }

    #[inline]
    pub fn plane_height(&self) -> f64 {
        self.plane_width * self.image_height / self.image_width
    }

    /// Pixel (y down, origin top-left) to scene units (y up, origin at centre).
    pub fn to_world(&self, px: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (px.x / self.image_width - 0.5) * self.plane_width,
            (0.5 - px.y / self.image_height) * self.plane_height(),
        )
    }

    /// Inverse of [`PhotoPlane::to_world`].
    pub fn to_screen(&self, world: Point2<f64>) -> Point2<f64> {
        Point2::new(
            (world.x / self.plane_width + 0.5) * self.image_width,
            (0.5 - world.y / self.plane_height()) * self.image_height,
        )
    }
}
