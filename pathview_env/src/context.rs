//! Core environment context trait for PathView playback.

use async_trait::async_trait;
use std::time::Duration;

/// The central interface for interacting with time.
///
/// This trait abstracts the clock so that the animator can run in both
/// production (tokio) and simulation (virtual clock) environments.
///
/// # Implementations
///
/// - **Production**: `TokioContext` - wraps `std::time::Instant` and `tokio::time`
/// - **Simulation**: `SimContext` - a manually advanced virtual clock
///
/// # Determinism
///
/// Ticker deadlines are computed from `now()`, so a context that controls
/// `now()` controls exactly which ticks fire and when.
#[async_trait]
pub trait PathViewContext: Send + Sync + 'static {
    /// Returns the current monotonic time since context creation.
    ///
    /// In simulation, this is the virtual clock time.
    fn now(&self) -> Duration;

    /// Suspends execution for the given duration.
    ///
    /// In production: wraps `tokio::time::sleep`
    /// In simulation: advances the virtual clock
    async fn sleep(&self, duration: Duration);
}
