//! PathView Core - Route Playback & Measurement
//!
//! This library covers the algorithmic part of a GPS route viewer:
//! 1. **Simplifier**: Ramer–Douglas–Peucker reduction of a recorded track
//! 2. **Animator**: fixed-cadence playback state machine over the reduced track
//! 3. **DistanceTracker**: running great-circle length over map clicks, with undo
//!
//! Rendering, tile fetching and GPX parsing live outside this crate. The
//! animator and tracker talk to them through the traits in [`render`].

pub mod animator;
pub mod geometry;
pub mod measure;
pub mod render;
pub mod simplify;
pub mod track;

// Re-export key types for convenience
pub use animator::{Animator, AnimatorConfig, PlaybackState};
pub use geometry::{Bounds, DistanceMetric, Point};
pub use measure::{DistanceTracker, MeasureConfig, MeasureReadout};
pub use render::{MapRenderer, MeasureSink, RecordingRenderer, RenderEvent, ViewFit};
pub use simplify::{simplify, simplify_indices};
pub use track::{Track, TrackError};
