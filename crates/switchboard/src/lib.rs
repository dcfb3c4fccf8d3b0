//! Switchboard: a multiplexer over named asynchronous sources
//!
//! This crate lets a single consumer wait on several independently
//! produced asynchronous sequences and handle whichever produces a value
//! first, without busy-polling and without starving any source.
//!
//! # Architecture
//!
//! Each registered source gets exactly one outstanding pull, run as a
//! spawned task, and one slot buffering its latest unclaimed result.
//! The consumer drives a two-step loop:
//!
//! - **ready**: suspend until at least one source has produced a value
//!   or reported exhaustion; simultaneous completions surface together
//! - **claim**: take a specific source's buffered result without
//!   suspending, or drain every ready slot at once
//!
//! Results left unclaimed across two consecutive readiness checks are
//! discarded and the affected source names are reported through an
//! injected sink; the board favors liveness over data completeness when
//! the consumer falls behind. Once every source has exhausted and all
//! slots are claimed, readiness is permanently false.
//!
//! # Example
//!
//! ```rust,no_run
//! use switchboard::{Claimed, Switchboard};
//! use tokio::sync::mpsc;
//!
//! # async fn run() -> Result<(), switchboard::SwitchboardError> {
//! let (control_tx, control_rx) = mpsc::channel::<u32>(16);
//! let (metrics_tx, metrics_rx) = mpsc::channel::<u32>(16);
//!
//! let mut board = Switchboard::builder()
//!     .source("control", control_rx)
//!     .source("metrics", metrics_rx)
//!     .build()?;
//!
//! while board.ready().await? {
//!     for (name, claimed) in board.drain_ready() {
//!         match claimed {
//!             Claimed::Value(value) => println!("{name}: {value}"),
//!             Claimed::Exhausted => println!("{name} is done"),
//!         }
//!     }
//! }
//! board.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod board;
pub mod error;
pub mod report;
pub mod source;

// Re-export engine types
pub use board::{Claimed, Switchboard, SwitchboardBuilder};
pub use error::SwitchboardError;

// Re-export the pull boundary and diagnostics
pub use report::{DropReporter, NullReporter, TracingReporter};
pub use source::{BoxSource, Source, StreamSource};
