//! Validated ingestion of already-parsed track coordinates.
//!
//! GPX/XML parsing happens upstream. This module is the last gate before the
//! core: coordinates that are not finite or not on the globe are rejected
//! here, so the simplifier and animator never see them.

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors raised while ingesting a track.
#[derive(Debug, Error)]
pub enum TrackError {
    #[error("Point {index}: non-finite coordinate ({lat}, {lon})")]
    NonFinite { index: usize, lat: f64, lon: f64 },

    #[error("Point {index}: latitude {lat} outside [-90, 90]")]
    LatitudeOutOfRange { index: usize, lat: f64 },

    #[error("Point {index}: longitude {lon} outside [-180, 180]")]
    LongitudeOutOfRange { index: usize, lon: f64 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),
}

/// An ordered, validated sequence of track points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    /// Track name, when the source had one
    pub name: Option<String>,

    points: Vec<Point>,
}

/// Accepted JSON shapes: a bare list of points, or a named track.
#[derive(Deserialize)]
#[serde(untagged)]
enum TrackFile {
    Bare(Vec<Point>),
    Named {
        name: Option<String>,
        points: Vec<Point>,
    },
}

impl Track {
    pub fn new(name: Option<String>, points: Vec<Point>) -> Result<Self, TrackError> {
        for (index, p) in points.iter().enumerate() {
            validate(index, p)?;
        }
        Ok(Self { name, points })
    }

    /// Builds a track from `[lat, lon]` pairs.
    pub fn from_coords(coords: Vec<[f64; 2]>) -> Result<Self, TrackError> {
        Self::new(None, coords.into_iter().map(Point::from).collect())
    }

    /// Parses `[{"lat": .., "lon": ..}, ..]` or `{"name": .., "points": [..]}`.
    pub fn from_json_str(json: &str) -> Result<Self, TrackError> {
        let file: TrackFile =
            serde_json::from_str(json).map_err(|e| TrackError::Parse(e.to_string()))?;
        let track = match file {
            TrackFile::Bare(points) => Self::new(None, points),
            TrackFile::Named { name, points } => Self::new(name, points),
        };
        if let Err(ref e) = track {
            warn!("Rejected track: {}", e);
        }
        track
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TrackError> {
        let json = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TrackError::Io(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_json_str(&json)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points(&self.points)
    }
}

fn validate(index: usize, p: &Point) -> Result<(), TrackError> {
    if !p.lat.is_finite() || !p.lon.is_finite() {
        return Err(TrackError::NonFinite {
            index,
            lat: p.lat,
            lon: p.lon,
        });
    }
    if !(-90.0..=90.0).contains(&p.lat) {
        return Err(TrackError::LatitudeOutOfRange { index, lat: p.lat });
    }
    if !(-180.0..=180.0).contains(&p.lon) {
        return Err(TrackError::LongitudeOutOfRange { index, lon: p.lon });
    }
    Ok(())
}
