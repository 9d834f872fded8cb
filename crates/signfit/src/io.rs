//! JSON request and report helpers for the `signfit` tool.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use signfit_core::{
    fit_detailed, AffineParams, FitError, FitParams, FitResult, Pose, Quad, SourceRect,
};

use crate::{PhotoPlane, PhotoPlaneError};

#[derive(thiserror::Error, Debug)]
pub enum SignfitIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Fit(#[from] FitError),
    #[error(transparent)]
    Photo(#[from] PhotoPlaneError),
}

/// How a request describes the sign's source rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    /// Half-extents given directly.
    HalfExtents { half_width: f64, half_height: f64 },
    /// Layout bounding box plus a padding margin on every side.
    Size {
        width: f64,
        height: f64,
        #[serde(default)]
        padding: f64,
    },
}

impl SourceSpec {
    pub fn to_rect(&self) -> Result<SourceRect, FitError> {
        match *self {
            SourceSpec::HalfExtents {
                half_width,
                half_height,
            } => SourceRect::new(half_width, half_height),
            SourceSpec::Size {
                width,
                height,
                padding,
            } => SourceRect::from_size(width, height, padding),
        }
    }
}

/// One fit to run: a source rectangle and the points clicked on the photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitRequest {
    pub source: SourceSpec,
    /// Clicked points in pixels, in click order.
    pub points: Vec<Point2<f64>>,
    /// Photo placement. Points are used as-is when absent.
    #[serde(default)]
    pub photo: Option<PhotoPlane>,
    #[serde(default)]
    pub params: FitParams,
    #[serde(default)]
    pub output_path: Option<String>,
}

impl FitRequest {
    /// Load a JSON request from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SignfitIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this request to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SignfitIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("signfit_report.json"))
    }

    /// Run the fit described by this request.
    pub fn fit(&self) -> Result<FitResult, SignfitIoError> {
        let source = self.source.to_rect()?;
        let result = match self.photo {
            Some(photo) => {
                photo.validate()?;
                fit_detailed(&source, &self.points, |p| photo.to_world(p), &self.params)?
            }
            None => fit_detailed(&source, &self.points, |p| p, &self.params)?,
        };
        Ok(result)
    }
}

/// Outcome of a [`FitRequest`], written next to the inputs it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    pub request_path: String,
    pub source: SourceSpec,
    pub points: Vec<Point2<f64>>,
    #[serde(default)]
    pub photo: Option<PhotoPlane>,
    #[serde(default)]
    pub ordered_points: Option<Quad>,
    #[serde(default)]
    pub world_points: Option<Quad>,
    #[serde(default)]
    pub affine: Option<AffineParams>,
    #[serde(default)]
    pub pose: Option<Pose>,
    #[serde(default)]
    pub uniform_scale: Option<f64>,
    #[serde(default)]
    pub residual_rms: Option<f64>,
    #[serde(default)]
    pub error: Option<String>,
}

impl FitReport {
    /// Build a base report from the request.
    pub fn new(req: &FitRequest, request_path: &Path) -> Self {
        Self {
            request_path: request_path.to_string_lossy().into_owned(),
            source: req.source,
            points: req.points.clone(),
            photo: req.photo,
            ordered_points: None,
            world_points: None,
            affine: None,
            pose: None,
            uniform_scale: None,
            residual_rms: None,
            error: None,
        }
    }

    /// Run `req` and capture either its result or its error.
    pub fn run(req: &FitRequest, request_path: &Path) -> Self {
        let mut report = Self::new(req, request_path);
        match req.fit() {
            Ok(res) => {
                info!(
                    "pose: position=({:.4}, {:.4}) rotation={:.4} scale={:.4}",
                    res.pose.position.x,
                    res.pose.position.y,
                    res.pose.rotation_z,
                    res.pose.uniform_scale
                );
                report.set_result(res);
            }
            Err(err) => {
                warn!("fit failed: {err}");
                report.set_error(err);
            }
        }
        report
    }

    /// Populate report fields from a successful fit.
    pub fn set_result(&mut self, res: FitResult) {
        self.ordered_points = Some(res.ordered);
        self.world_points = Some(res.target);
        self.affine = Some(res.affine);
        self.pose = Some(res.pose);
        self.uniform_scale = Some(res.pose.uniform_scale);
        self.residual_rms = Some(res.residual_rms);
        self.error = None;
    }

    /// Record a failed fit.
    pub fn set_error(&mut self, err: SignfitIoError) {
        self.error = Some(err.to_string());
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SignfitIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SignfitIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
