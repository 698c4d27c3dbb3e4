//! Playback and measurement runners.

use crate::error::SimError;
use crate::generator::TrackGenerator;

use pathview_core::{
    Animator, AnimatorConfig, DistanceMetric, DistanceTracker, MeasureConfig, MeasureReadout,
    Point, RecordingRenderer, RenderEvent, Track, ViewFit,
};
use pathview_env::PathViewContext;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for a harness run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Master seed for synthetic tracks
    pub seed: u64,

    /// Samples in a synthetic track (default: 2000)
    pub synthetic_points: usize,

    /// First point of synthetic tracks
    pub start: Point,

    /// Distance between synthetic samples, in metres (default: 5)
    pub step_m: f64,

    /// GPS noise of synthetic tracks, in degrees (default: 1e-5, roughly 1m)
    pub jitter_deg: f64,

    /// Playback settings handed to the animator
    pub animator: AnimatorConfig,

    /// Give up on playback after this much (virtual or real) time
    pub max_playback: Duration,

    /// Points of the track replayed as measure clicks (0 = skip)
    pub measure_clicks: usize,

    /// Metric for the measure run
    pub metric: DistanceMetric,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            synthetic_points: 2000,
            start: Point::new(53.54, -113.5),
            step_m: 5.0,
            jitter_deg: 1e-5,
            animator: AnimatorConfig::default(),
            max_playback: Duration::from_secs(3600),
            measure_clicks: 0,
            metric: DistanceMetric::Haversine,
        }
    }
}

/// Outcome of replaying one track.
#[derive(Debug, Clone)]
pub struct PlaybackResult {
    pub track_name: Option<String>,

    /// Points in the track as loaded
    pub input_points: usize,

    /// Track after simplification, as played
    pub simplified: Vec<Point>,

    /// Frames drawn
    pub frames: usize,

    /// Playback time on the context's clock
    pub elapsed: Duration,

    pub fit: Option<ViewFit>,

    /// Everything sent to the renderer, in order
    pub events: Vec<RenderEvent>,
}

impl PlaybackResult {
    /// Fraction of input points dropped by simplification.
    pub fn reduction(&self) -> f64 {
        if self.input_points == 0 {
            0.0
        } else {
            1.0 - self.simplified.len() as f64 / self.input_points as f64
        }
    }
}

/// Outcome of replaying track points as measure clicks.
#[derive(Debug, Clone)]
pub struct MeasureResult {
    /// Every readout emitted, in order
    pub readouts: Vec<MeasureReadout>,

    /// Final incremental total in metres
    pub total_m: f64,

    /// Same total recomputed from scratch over the remaining clicks
    pub recomputed_m: f64,

    /// Point removed by the final undo
    pub undone: Option<Point>,
}

impl MeasureResult {
    /// Label shown after the run.
    pub fn final_label(&self) -> &str {
        self.readouts
            .last()
            .map(|r| r.label.as_str())
            .unwrap_or(pathview_core::measure::IDLE_LABEL)
    }
}

/// Runs playback against any context.
pub struct PlaybackRunner<Ctx: PathViewContext> {
    context: Arc<Ctx>,
    config: SimConfig,
}

impl<Ctx: PathViewContext> PlaybackRunner<Ctx> {
    pub fn new(context: Arc<Ctx>, config: SimConfig) -> Self {
        Self { context, config }
    }

    /// Starts an animation over `track` and drives it to completion.
    pub async fn run_playback(&self, track: &Track) -> Result<PlaybackResult, SimError> {
        info!(
            "Playing {} ({} points, tick {}ms)",
            track.name.as_deref().unwrap_or("track"),
            track.len(),
            self.config.animator.tick_interval.as_millis()
        );

        let mut animator = Animator::with_config(
            self.context.clone(),
            RecordingRenderer::new(),
            self.config.animator.clone(),
        );

        let started = self.context.now();
        animator.start(track.points());
        let simplified = animator.points().map(|p| p.to_vec()).unwrap_or_default();

        let frames = animator.play_to_end(self.config.max_playback).await?;
        let elapsed = self.context.now().saturating_sub(started);
        debug!(frames, elapsed_ms = elapsed.as_millis() as u64, "Playback complete");

        let renderer = animator.into_renderer();
        let fit = renderer.last_fit().copied();

        Ok(PlaybackResult {
            track_name: track.name.clone(),
            input_points: track.len(),
            simplified,
            frames,
            elapsed,
            fit,
            events: renderer.into_events(),
        })
    }
}

/// Generates the seeded synthetic track described by `config`.
pub fn synthetic_track(config: &SimConfig) -> Result<Track, SimError> {
    let track = TrackGenerator::new(config.seed)
        .with_start(config.start)
        .with_step(config.step_m)
        .with_jitter(config.jitter_deg)
        .generate(config.synthetic_points)?;
    Ok(track)
}

/// Clicks the first `config.measure_clicks` points of `track`, then undoes
/// the last one.
pub fn run_measure(track: &Track, config: &SimConfig) -> MeasureResult {
    let measure_config = MeasureConfig {
        metric: config.metric,
    };
    let mut tracker = DistanceTracker::with_config(Vec::new(), measure_config);

    for point in track.points().iter().take(config.measure_clicks) {
        tracker.add_point(*point);
    }
    let before_undo = tracker.current_total();
    let undone = tracker.remove_last();

    info!(
        clicks = tracker.points().len(),
        before_undo_m = before_undo,
        "{}",
        tracker.label()
    );

    let total_m = tracker.current_total();
    let recomputed_m = config.metric.path_length(tracker.points());

    MeasureResult {
        readouts: tracker.into_sink(),
        total_m,
        recomputed_m,
        undone,
    }
}
