//! JSON exporter for playback runs.
//!
//! Writes the frames a run produced, so a map front end can replay them
//! without running the animator itself.

use crate::runner::{PlaybackResult, SimConfig};

use pathview_core::{MeasureReadout, Point, RenderEvent, ViewFit};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// A single drawn frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFrame {
    /// Playback time of the frame, from start
    pub time_ms: u64,

    /// Where the position marker is
    pub marker: Point,

    /// How many simplified points the drawn path covers
    pub path_len: usize,
}

/// Complete playback export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackExport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,

    /// Seed used for synthetic input
    pub seed: u64,

    pub tick_interval_ms: u64,

    /// Simplification tolerance, in degrees
    pub epsilon: f64,

    pub input_points: usize,

    /// The track as played
    pub simplified_points: Vec<Point>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fit: Option<ViewFit>,

    pub frames: Vec<ExportFrame>,

    /// Measure readout, if a measure run was made
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measure: Option<MeasureReadout>,

    /// Whether every simplified point was drawn
    pub completed: bool,
}

impl PlaybackExport {
    /// Creates an empty export container.
    pub fn new(track_name: Option<String>, config: &SimConfig) -> Self {
        Self {
            track_name,
            seed: config.seed,
            tick_interval_ms: config.animator.tick_interval.as_millis() as u64,
            epsilon: config.animator.epsilon,
            input_points: 0,
            simplified_points: Vec::new(),
            fit: None,
            frames: Vec::new(),
            measure: None,
            completed: false,
        }
    }

    /// Builds an export from a finished playback.
    pub fn from_playback(result: &PlaybackResult, config: &SimConfig) -> Self {
        let mut export = Self::new(result.track_name.clone(), config);
        export.input_points = result.input_points;
        export.simplified_points = result.simplified.clone();
        export.fit = result.fit;

        for event in &result.events {
            if let RenderEvent::Frame { marker, path_len } = event {
                export.add_frame(*marker, *path_len);
            }
        }
        export
    }

    /// Appends a frame one tick after the previous one.
    pub fn add_frame(&mut self, marker: Point, path_len: usize) {
        let time_ms = (self.frames.len() as u64 + 1) * self.tick_interval_ms;
        self.frames.push(ExportFrame {
            time_ms,
            marker,
            path_len,
        });
    }

    /// Finalizes the export.
    pub fn finalize(&mut self, measure: Option<MeasureReadout>) {
        self.measure = measure;
        self.completed = self.frames.len() == self.simplified_points.len();
    }

    /// Playback length covered by the frames.
    pub fn duration_ms(&self) -> u64 {
        self.frames.last().map(|f| f.time_ms).unwrap_or(0)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::SimContext;
    use crate::generator::TrackGenerator;
    use crate::runner::PlaybackRunner;

    #[test]
    fn test_frames_are_spaced_by_tick() {
        let mut export = PlaybackExport::new(None, &SimConfig::default());
        let a = Point::new(53.5, -113.5);
        let b = Point::new(53.6, -113.4);
        export.add_frame(a, 1);
        export.add_frame(b, 2);

        assert_eq!(export.frames[0].time_ms, 75);
        assert_eq!(export.frames[1].time_ms, 150);
        assert_eq!(export.duration_ms(), 150);
    }

    #[test]
    fn test_finalize_incomplete() {
        let mut export = PlaybackExport::new(None, &SimConfig::default());
        export.simplified_points = vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)];
        export.add_frame(Point::new(0.0, 0.0), 1);
        export.finalize(None);
        assert!(!export.completed);
    }

    #[tokio::test]
    async fn test_export_from_playback_and_write() {
        let config = SimConfig::default();
        let track = TrackGenerator::new(config.seed).generate(300).unwrap();
        let runner = PlaybackRunner::new(SimContext::shared(), config.clone());
        let result = runner.run_playback(&track).await.unwrap();

        let mut export = PlaybackExport::from_playback(&result, &config);
        export.finalize(None);

        assert!(export.completed);
        assert_eq!(export.frames.len(), result.frames);
        assert_eq!(export.duration_ms() as u128, result.elapsed.as_millis());
        assert_eq!(export.frames.last().map(|f| f.path_len), Some(result.simplified.len()));

        let path = std::env::temp_dir().join(format!("pathview-export-{}.json", std::process::id()));
        export.write_to_file(&path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["seed"], 42);
        assert_eq!(written["tick_interval_ms"], 75);
        assert_eq!(written["completed"], true);
        assert!(written.get("measure").is_none());

        std::fs::remove_file(&path).ok();
    }
}
