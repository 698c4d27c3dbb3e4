//! PathView Environment Abstraction Layer
//!
//! This crate provides the "Sans-IO" seam that lets the playback engine run
//! against either the **wall clock** (tokio) or a **virtual clock** (the
//! simulation harness in `pathview_sim`).
//!
//! # Core Concept
//!
//! The animator never reads time or sleeps on its own. Everything that would
//! make playback non-deterministic goes through a [`PathViewContext`]:
//! - Time (`now()`)
//! - Waiting for the next tick (`sleep()`)
//!
//! Under a virtual clock, a 10 minute track replay finishes instantly and
//! produces exactly the same frames on every run.
//!
//! # Example
//!
//! ```ignore
//! use pathview_env::{PathViewContext, TokioContext};
//!
//! async fn drive<Ctx: PathViewContext>(ctx: &Ctx) {
//!     loop {
//!         ctx.sleep(Duration::from_millis(75)).await;
//!         tick();
//!     }
//! }
//! ```

mod context;
mod error;
mod tokio_impl;

pub use context::PathViewContext;
pub use error::EnvError;
pub use tokio_impl::TokioContext;
