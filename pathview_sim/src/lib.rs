//! PathView Deterministic Playback Harness
//!
//! Runs the playback state machine against a virtual clock, so a track
//! that takes minutes to animate on a real map replays instantly and
//! produces the same frames on every run.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                      PlaybackRunner                       │
//! │  ┌───────────────┐   ┌──────────────────────────────┐     │
//! │  │ TrackGenerator│──▶│ Animator<Ctx, Recording>     │     │
//! │  │ (seeded walk) │   │  simplify → fit → tick ...   │     │
//! │  └───────────────┘   └──────────────┬───────────────┘     │
//! │          or                         │ RenderEvents        │
//! │     Track JSON                ┌─────▼──────┐              │
//! │                               │  Exporter  │──▶ JSON file │
//! │                               └────────────┘              │
//! │  Ctx = SimContext (virtual clock) | TokioContext (wall)   │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use pathview_sim::{synthetic_track, PlaybackRunner, SimConfig, SimContext};
//!
//! let config = SimConfig::default();
//! let track = synthetic_track(&config)?;
//! let runner = PlaybackRunner::new(SimContext::shared(), config);
//! let result = runner.run_playback(&track).await?;
//! ```

mod context;
mod error;
mod exporter;
mod generator;
mod runner;

pub use context::SimContext;
pub use error::SimError;
pub use exporter::{ExportFrame, PlaybackExport};
pub use generator::TrackGenerator;
pub use runner::{
    run_measure, synthetic_track, MeasureResult, PlaybackResult, PlaybackRunner, SimConfig,
};
