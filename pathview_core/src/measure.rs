//! Click-to-measure: a running ground distance over clicked points, with undo.
//!
//! Each click adds one segment to the total and each undo subtracts the last
//! segment again, so updates are O(1) regardless of how many points exist.

use crate::geometry::{DistanceMetric, Point};
use crate::render::MeasureSink;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Totals above this many metres are shown in kilometres.
pub const KILOMETRE_THRESHOLD_M: f64 = 10_000.0;

/// Label shown when nothing has been measured.
pub const IDLE_LABEL: &str = "Measure";

/// Configuration for a [`DistanceTracker`].
#[derive(Debug, Clone, Default)]
pub struct MeasureConfig {
    /// How segment lengths are computed (default: haversine)
    pub metric: DistanceMetric,
}

/// What the measure control should display after an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureReadout {
    /// e.g. "Measure: 842.17 m" or "Measure: 12.408 km"
    pub label: String,

    /// Running total in metres
    pub total_meters: f64,

    /// Whether undoing the last point is offered (more than one point placed)
    pub can_undo: bool,

    /// Most recent point, where the end marker goes
    pub last: Option<Point>,
}

/// Formats a distance in metres the way the measure label shows it.
pub fn format_distance(meters: f64) -> String {
    if meters > KILOMETRE_THRESHOLD_M {
        format!("{:.3} km", meters / 1000.0)
    } else {
        format!("{:.2} m", meters)
    }
}

/// Incremental distance accumulator over clicked points.
pub struct DistanceTracker<S: MeasureSink> {
    config: MeasureConfig,
    clicks: Vec<Point>,
    total: f64,
    sink: S,
}

impl<S: MeasureSink> DistanceTracker<S> {
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, MeasureConfig::default())
    }

    pub fn with_config(sink: S, config: MeasureConfig) -> Self {
        Self {
            config,
            clicks: Vec::new(),
            total: 0.0,
            sink,
        }
    }

    /// Appends a clicked point and extends the total by the new segment.
    pub fn add_point(&mut self, point: Point) {
        if let Some(prev) = self.clicks.last() {
            self.total += self.config.metric.distance(prev, &point);
        }
        self.clicks.push(point);
        debug!(points = self.clicks.len(), total_m = self.total, "Measure point added");
        self.emit();
    }

    /// Removes the last point and shortens the total by its segment.
    ///
    /// Returns None, without emitting, when there is nothing to remove.
    pub fn remove_last(&mut self) -> Option<Point> {
        let removed = self.clicks.pop()?;

        if let Some(last) = self.clicks.last() {
            self.total -= self.config.metric.distance(last, &removed);
        }

        // Subtraction drifts; pin the total back onto its invariants
        if self.clicks.len() <= 1 || self.total < 0.0 {
            self.total = 0.0;
        }

        debug!(points = self.clicks.len(), total_m = self.total, "Measure point removed");
        self.emit();
        Some(removed)
    }

    /// Forgets every point.
    pub fn reset(&mut self) {
        self.clicks.clear();
        self.total = 0.0;
        self.emit();
    }

    /// Running total in metres.
    pub fn current_total(&self) -> f64 {
        self.total
    }

    pub fn points(&self) -> &[Point] {
        &self.clicks
    }

    pub fn label(&self) -> String {
        if self.clicks.is_empty() {
            IDLE_LABEL.to_string()
        } else {
            format!("{}: {}", IDLE_LABEL, format_distance(self.total))
        }
    }

    pub fn readout(&self) -> MeasureReadout {
        MeasureReadout {
            label: self.label(),
            total_meters: self.total,
            can_undo: self.clicks.len() > 1,
            last: self.clicks.last().copied(),
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self) {
        let readout = self.readout();
        self.sink.on_update(&readout);
    }
}
