//! Playback Animator - replays a simplified track at a fixed cadence.
//!
//! The animator is a small state machine with two states:
//!
//! ```text
//!            start / restart
//!   ┌──────┐ ───────────────▶ ┌─────────┐
//!   │ Idle │                  │ Running │ ── tick: draw points[cursor], cursor += 1
//!   └──────┘ ◀─────────────── └─────────┘
//!        stop / reset / cursor reaches the end
//! ```
//!
//! It is sans-IO: time is read from a [`PathViewContext`] and ticks fire only
//! when [`Animator::poll`] is called. [`Animator::play_to_end`] is the async
//! driver that sleeps on the context between deadlines. Under the tokio
//! context this is wall-clock playback; under a virtual clock it is
//! deterministic and instant.
//!
//! # Ticker ownership
//!
//! The periodic timer is a [`Ticker`] value owned by the animator. Starting a
//! new animation drops the previous ticker before installing a fresh one, so
//! two timers can never race on the same drawn path.

use crate::geometry::{Bounds, Point};
use crate::render::{MapRenderer, ViewFit};
use crate::simplify::simplify;

use pathview_env::{EnvError, PathViewContext};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Playback configuration. Fixed for the lifetime of an [`Animator`].
#[derive(Debug, Clone)]
pub struct AnimatorConfig {
    /// Time between ticks (default: 75ms)
    pub tick_interval: Duration,

    /// Simplification tolerance in raw degrees (default: 5e-5)
    ///
    /// A degree of longitude shrinks towards the poles, so the same value
    /// is a tighter tolerance east-west than north-south away from the equator.
    pub epsilon: f64,

    /// Padding around the track when fitting the view (default: 50x50 px)
    pub fit_padding_px: (u32, u32),
}

impl Default for AnimatorConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(75),
            epsilon: 5e-5,
            fit_padding_px: (50, 50),
        }
    }
}

/// Externally visible playback state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Running,
}

/// A cancellable periodic deadline.
///
/// Dropping the ticker cancels it: there is nothing else to clean up.
#[derive(Debug)]
struct Ticker {
    id: u64,
    period: Duration,
    next_due: Duration,
}

impl Ticker {
    fn new(id: u64, now: Duration, period: Duration) -> Self {
        Self {
            id,
            period,
            next_due: now + period,
        }
    }

    /// Consumes one due tick, if any.
    fn take_due(&mut self, now: Duration) -> bool {
        if now >= self.next_due {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }
}

/// The simplified track being played and how far playback got.
#[derive(Debug)]
struct Animation {
    points: Vec<Point>,
    cursor: usize,
}

/// Fixed-cadence playback over a simplified track.
///
/// Generic over the context (clock) and renderer, so the same state machine
/// drives a real map or a recording in tests.
pub struct Animator<Ctx, R>
where
    Ctx: PathViewContext,
    R: MapRenderer,
{
    context: Arc<Ctx>,
    renderer: R,
    config: AnimatorConfig,

    /// At most one animation exists at a time
    animation: Option<Animation>,

    /// Live only while Running
    ticker: Option<Ticker>,

    /// Tickers handed out so far, used as ticker ids in logs
    tickers_issued: u64,
}

impl<Ctx, R> Animator<Ctx, R>
where
    Ctx: PathViewContext,
    R: MapRenderer,
{
    pub fn new(context: Arc<Ctx>, renderer: R) -> Self {
        Self::with_config(context, renderer, AnimatorConfig::default())
    }

    pub fn with_config(context: Arc<Ctx>, renderer: R, config: AnimatorConfig) -> Self {
        Self {
            context,
            renderer,
            config,
            animation: None,
            ticker: None,
            tickers_issued: 0,
        }
    }

    /// Replaces any current animation with one over `points` and starts it.
    ///
    /// The previous animation is reset first (its path cleared). The new
    /// track is simplified, the view is fitted to it, and ticking begins one
    /// interval from now.
    pub fn start(&mut self, points: &[Point]) {
        self.reset();

        let simplified = simplify(points, self.config.epsilon);
        info!(
            input = points.len(),
            simplified = simplified.len(),
            "Simplified from {} to {} points",
            points.len(),
            simplified.len()
        );

        self.animation = Some(Animation {
            points: simplified,
            cursor: 0,
        });
        self.recenter();
        self.arm_ticker();
    }

    /// Halts ticking. The cursor and the drawn path stay where they are.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            debug!(ticker = ticker.id, "Ticker cancelled");
        }
    }

    /// Halts ticking, rewinds to the first point and clears the drawing.
    pub fn reset(&mut self) {
        self.stop();
        if let Some(animation) = self.animation.as_mut() {
            animation.cursor = 0;
            self.renderer.on_tick(None, &[]);
        }
    }

    /// Plays the current track again from the beginning.
    pub fn restart(&mut self) {
        if self.animation.is_none() {
            return;
        }
        self.reset();
        self.arm_ticker();
    }

    /// Resets and forgets the current track.
    pub fn clear(&mut self) {
        self.reset();
        self.animation = None;
    }

    /// Fits the view to the current track again.
    pub fn recenter(&mut self) {
        let Some(animation) = self.animation.as_ref() else {
            return;
        };
        if let Some(bounds) = Bounds::from_points(&animation.points) {
            let fit = ViewFit {
                bounds,
                padding_px: self.config.fit_padding_px,
            };
            self.renderer.on_fit(&fit);
        }
    }

    /// Fires every tick that is due at the context's current time.
    ///
    /// Returns the number of frames drawn. A late caller catches up on all
    /// missed ticks, one frame each.
    pub fn poll(&mut self) -> usize {
        let now = self.context.now();
        let mut frames = 0;

        while let Some(ticker) = self.ticker.as_mut() {
            if !ticker.take_due(now) {
                break;
            }
            if self.tick() {
                frames += 1;
            }
        }

        frames
    }

    /// When the next tick is due, if the animation is running.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.ticker.as_ref().map(|t| t.next_due)
    }

    /// Sleeps on the context between deadlines until playback stops.
    ///
    /// Returns the number of frames drawn, or a timeout if the animation is
    /// still running once `budget` has elapsed.
    pub async fn play_to_end(&mut self, budget: Duration) -> Result<usize, EnvError> {
        let started = self.context.now();
        let mut frames = 0;

        while let Some(deadline) = self.next_deadline() {
            let now = self.context.now();
            if now.saturating_sub(started) > budget {
                return Err(EnvError::timeout(budget));
            }
            if deadline > now {
                self.context.sleep(deadline - now).await;
            }
            frames += self.poll();
        }

        debug!(frames, "Playback finished");
        Ok(frames)
    }

    pub fn state(&self) -> PlaybackState {
        if self.ticker.is_some() {
            PlaybackState::Running
        } else {
            PlaybackState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == PlaybackState::Running
    }

    /// Index of the next point to draw, if there is an animation.
    pub fn cursor(&self) -> Option<usize> {
        self.animation.as_ref().map(|a| a.cursor)
    }

    /// The simplified track being played.
    pub fn points(&self) -> Option<&[Point]> {
        self.animation.as_ref().map(|a| a.points.as_slice())
    }

    pub fn config(&self) -> &AnimatorConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    fn arm_ticker(&mut self) {
        self.stop();
        self.tickers_issued += 1;
        let ticker = Ticker::new(
            self.tickers_issued,
            self.context.now(),
            self.config.tick_interval,
        );
        debug!(ticker = ticker.id, "Ticker armed");
        self.ticker = Some(ticker);
    }

    /// One step of playback. Returns true if a frame was drawn.
    fn tick(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            self.stop();
            return false;
        };

        if animation.cursor >= animation.points.len() {
            self.stop();
            return false;
        }

        let marker = animation.points[animation.cursor];
        animation.cursor += 1;
        self.renderer
            .on_tick(Some(marker), &animation.points[..animation.cursor]);

        // Release the ticker as soon as the last point is drawn
        if animation.cursor >= animation.points.len() {
            self.stop();
        }
        true
    }
}
