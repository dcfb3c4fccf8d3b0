//! Scripted producers for switchboard consumers
//!
//! This crate provides deterministic `Source` implementations for testing
//! switchboard-based code without real producers:
//!
//! - **ScriptedSource**: plays back a fixed list of values and pauses
//! - **PendingSource**: a pull that never resolves
//! - **PanicSource**: a pull that panics, for failure-path coverage
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use switchboard_sim::{ScriptStep, ScriptedSource};
//!
//! let source = ScriptedSource::new([
//!     ScriptStep::Yield(42u32),
//!     ScriptStep::Pause(Duration::from_millis(250)),
//!     ScriptStep::Yield(43),
//! ]);
//! assert_eq!(source.remaining(), 3);
//! ```

pub mod faults;
pub mod script;

pub use faults::{PanicSource, PendingSource};
pub use script::{ScriptStep, ScriptedSource};
