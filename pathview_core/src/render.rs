//! Collaborator interfaces for whatever draws the map and the measure label.
//!
//! The core only emits updates; a Leaflet bridge, a terminal viewer or the
//! recording sinks below decide what to do with them.

use crate::geometry::{Bounds, Point};
use crate::measure::MeasureReadout;
use serde::{Deserialize, Serialize};

/// Request to fit the map view around a track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewFit {
    pub bounds: Bounds,

    /// Screen padding (x, y) to leave around the bounds, in pixels
    pub padding_px: (u32, u32),
}

/// Receives playback updates from an [`Animator`](crate::Animator).
pub trait MapRenderer {
    /// Draw the position marker and the path travelled so far.
    ///
    /// `marker == None` with an empty `path` means "nothing drawn": the
    /// marker is hidden and the path is cleared.
    fn on_tick(&mut self, marker: Option<Point>, path: &[Point]);

    /// Fit the view to the given bounds.
    fn on_fit(&mut self, fit: &ViewFit);
}

/// Receives the running total from a [`DistanceTracker`](crate::DistanceTracker).
pub trait MeasureSink {
    fn on_update(&mut self, readout: &MeasureReadout);
}

/// Everything a [`MapRenderer`] was asked to do, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderEvent {
    /// One playback frame. `path_len` points of the track are drawn.
    Frame { marker: Point, path_len: usize },
    /// Marker hidden, path cleared
    Cleared,
    Fit(ViewFit),
}

/// Renderer that records events instead of drawing them.
///
/// Used by the simulation harness for export, and by tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    events: Vec<RenderEvent>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Number of playback frames drawn.
    pub fn frame_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RenderEvent::Frame { .. }))
            .count()
    }

    pub fn last_fit(&self) -> Option<&ViewFit> {
        self.events.iter().rev().find_map(|e| match e {
            RenderEvent::Fit(fit) => Some(fit),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn into_events(self) -> Vec<RenderEvent> {
        self.events
    }
}

impl MapRenderer for RecordingRenderer {
    fn on_tick(&mut self, marker: Option<Point>, path: &[Point]) {
        match marker {
            Some(marker) => self.events.push(RenderEvent::Frame {
                marker,
                path_len: path.len(),
            }),
            None => self.events.push(RenderEvent::Cleared),
        }
    }

    fn on_fit(&mut self, fit: &ViewFit) {
        self.events.push(RenderEvent::Fit(*fit));
    }
}

impl MeasureSink for Vec<MeasureReadout> {
    fn on_update(&mut self, readout: &MeasureReadout) {
        self.push(readout.clone());
    }
}
