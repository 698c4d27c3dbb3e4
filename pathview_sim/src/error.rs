//! Error type for harness runs.

use pathview_core::TrackError;
use pathview_env::EnvError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Track error: {0}")]
    Track(#[from] TrackError),

    #[error("Playback error: {0}")]
    Playback(#[from] EnvError),

    #[error("Export error: {0}")]
    Export(#[from] std::io::Error),
}
