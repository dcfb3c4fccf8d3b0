//! The switchboard engine
//!
//! The core multiplexing logic: one outstanding pull per registered
//! source, a per-source slot buffering the latest unclaimed result, and
//! the two-step "wait for readiness, then claim" consumer contract.

use std::collections::HashMap;

use tokio::task::{Id, JoinError, JoinSet};
use tracing::debug;

use crate::error::SwitchboardError;
use crate::report::{DropReporter, TracingReporter};
use crate::source::{BoxSource, Source};

/// What a claim found in a source's slot
#[derive(Debug, PartialEq, Eq)]
pub enum Claimed<T> {
    /// The source produced this value
    Value(T),
    /// The source is exhausted and will produce nothing further
    Exhausted,
}

/// Per-source storage for the latest unclaimed result
enum Slot<T> {
    Empty,
    Value(T),
    Exhausted,
}

/// A completed pull, carried back from the task that ran it
///
/// The source travels into the task and back out, so the next pull can
/// be issued against it without any shared ownership.
struct Pull<T> {
    index: usize,
    item: Option<T>,
    source: BoxSource<T>,
}

/// Multiplexer over named asynchronous sources
///
/// Waits for whichever source produces next, buffers at most one result
/// per source until the consumer claims it, and reports per-source
/// exhaustion through the same claim mechanism. Dropping the board aborts
/// any outstanding pulls as a backstop, but [`Switchboard::shutdown`] is
/// the deterministic release path and should run on every exit.
pub struct Switchboard<T> {
    names: Vec<String>,
    index: HashMap<String, usize>,
    slots: Vec<Slot<T>>,
    pulls: JoinSet<Pull<T>>,
    outstanding: HashMap<Id, usize>,
    ready_count: usize,
    baseline: usize,
    reporter: Box<dyn DropReporter>,
}

impl<T: Send + 'static> Switchboard<T> {
    /// Start building a switchboard
    pub fn builder() -> SwitchboardBuilder<T> {
        SwitchboardBuilder {
            sources: Vec::new(),
            reporter: Box::new(TracingReporter),
        }
    }

    /// Wait until at least one source has an unclaimed result
    ///
    /// Returns `Ok(true)` when one or more slots hold a value or an
    /// exhaustion marker, and `Ok(false)` once every source is done and
    /// everything has been claimed; the `false` state is permanent.
    /// Results left unclaimed across two consecutive calls are discarded
    /// and reported through the drop sink rather than re-surfaced, so a
    /// consumer must claim every slot it cares about between calls.
    ///
    /// Completions racing into the same wake surface together, and a
    /// source that produced a value has its next pull issued before this
    /// returns. A pull that fails for any reason other than exhaustion
    /// surfaces as [`SwitchboardError::PullFailed`] naming the source;
    /// values settled in the same wake remain claimable afterwards.
    ///
    /// Cancel safe: the only await is on task completion, so the caller
    /// may race this against a timer and drop the future without losing
    /// any completions.
    pub async fn ready(&mut self) -> Result<bool, SwitchboardError> {
        if self.ready_count > 0 {
            if self.ready_count == self.baseline {
                self.discard_stale();
            } else {
                self.baseline = self.ready_count;
                return Ok(true);
            }
        }

        if self.pulls.is_empty() {
            return Ok(false);
        }
        self.baseline = 0;

        let Some(first) = self.pulls.join_next_with_id().await else {
            return Ok(false);
        };

        // Snapshot the whole wake before touching any slot, so a
        // replenished pull that completes instantly cannot join this batch.
        let mut batch = vec![first];
        while let Some(next) = self.pulls.try_join_next_with_id() {
            batch.push(next);
        }

        let mut failed = None;
        for completion in batch {
            if let Err(err) = self.settle(completion) {
                failed.get_or_insert(err);
            }
        }
        if let Some(err) = failed {
            // Same-wake values stay claimable: with the baseline left at
            // zero the next call surfaces them without waiting.
            return Err(err);
        }

        self.baseline = self.ready_count;
        Ok(true)
    }

    /// Claim the unclaimed result of a named source, if any
    ///
    /// `Ok(None)` means the slot is empty: either the source has not
    /// produced since the last claim, or its result was already taken.
    /// `Ok(Some(Claimed::Exhausted))` is observed exactly once per source.
    /// Never suspends; claiming is the only way the ready count decreases.
    pub fn claim(&mut self, name: &str) -> Result<Option<Claimed<T>>, SwitchboardError> {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| SwitchboardError::UnknownSource(name.to_string()))?;

        match std::mem::replace(&mut self.slots[position], Slot::Empty) {
            Slot::Empty => Ok(None),
            Slot::Value(value) => {
                self.ready_count -= 1;
                Ok(Some(Claimed::Value(value)))
            }
            Slot::Exhausted => {
                self.ready_count -= 1;
                Ok(Some(Claimed::Exhausted))
            }
        }
    }

    /// Claim every holding slot, in registration order
    pub fn drain_ready(&mut self) -> Vec<(String, Claimed<T>)> {
        let mut claimed = Vec::new();
        for position in 0..self.slots.len() {
            match std::mem::replace(&mut self.slots[position], Slot::Empty) {
                Slot::Empty => {}
                Slot::Value(value) => {
                    self.ready_count -= 1;
                    claimed.push((self.names[position].clone(), Claimed::Value(value)));
                }
                Slot::Exhausted => {
                    self.ready_count -= 1;
                    claimed.push((self.names[position].clone(), Claimed::Exhausted));
                }
            }
        }
        claimed
    }

    /// Cancel all outstanding pulls and discard any unclaimed results
    ///
    /// Leaves the board in the ordinary terminal state: `ready` returns
    /// `Ok(false)` and claims on registered names return `Ok(None)`.
    /// Idempotent.
    pub async fn shutdown(&mut self) {
        self.pulls.shutdown().await;
        self.outstanding.clear();
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.ready_count = 0;
        self.baseline = 0;
        debug!("switchboard shut down");
    }

    /// Names of all registered sources, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of registered sources
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no sources were registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a name belongs to a registered source
    pub fn is_registered(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of slots currently holding an unclaimed result
    pub fn ready_count(&self) -> usize {
        self.ready_count
    }

    /// Whether every source is done and nothing is left to claim
    pub fn is_terminated(&self) -> bool {
        self.pulls.is_empty() && self.ready_count == 0
    }

    /// Spawn the next pull for a source and tag the task with its index
    fn issue(&mut self, index: usize, mut source: BoxSource<T>) {
        let handle = self.pulls.spawn(async move {
            let item = source.pull().await;
            Pull {
                index,
                item,
                source,
            }
        });
        self.outstanding.insert(handle.id(), index);
    }

    /// Apply one completed pull to the slots and counters
    fn settle(
        &mut self,
        completion: Result<(Id, Pull<T>), JoinError>,
    ) -> Result<(), SwitchboardError> {
        match completion {
            Ok((task, pull)) => {
                self.outstanding.remove(&task);
                let Pull {
                    index,
                    item,
                    source,
                } = pull;
                match item {
                    Some(value) => {
                        self.slots[index] = Slot::Value(value);
                        self.ready_count += 1;
                        self.issue(index, source);
                    }
                    None => {
                        self.slots[index] = Slot::Exhausted;
                        self.ready_count += 1;
                        debug!("source {} exhausted", self.names[index]);
                    }
                }
                Ok(())
            }
            Err(err) => {
                let name = match self.outstanding.remove(&err.id()) {
                    Some(position) => self.names[position].clone(),
                    None => String::from("<unknown>"),
                };
                Err(SwitchboardError::PullFailed { name, cause: err })
            }
        }
    }

    /// Discard every holding slot and report the affected source names
    fn discard_stale(&mut self) {
        let mut dropped = Vec::new();
        for (position, slot) in self.slots.iter_mut().enumerate() {
            if !matches!(slot, Slot::Empty) {
                *slot = Slot::Empty;
                dropped.push(self.names[position].as_str());
            }
        }
        self.ready_count = 0;
        self.baseline = 0;
        self.reporter.on_stale_drop(&dropped);
    }
}

/// Builder collecting named sources and the drop sink for a [`Switchboard`]
pub struct SwitchboardBuilder<T> {
    sources: Vec<(String, BoxSource<T>)>,
    reporter: Box<dyn DropReporter>,
}

impl<T: Send + 'static> SwitchboardBuilder<T> {
    /// Register a source under a unique name
    pub fn source(
        mut self,
        name: impl Into<String>,
        source: impl Source<Item = T> + 'static,
    ) -> Self {
        self.sources.push((name.into(), Box::new(source)));
        self
    }

    /// Replace the stale-drop diagnostic sink
    pub fn reporter(mut self, reporter: impl DropReporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    /// Validate the registrations and issue the first pull for each source
    ///
    /// Duplicate names fail before anything is spawned, so an error here
    /// leaks no tasks. Must be called within a tokio runtime context.
    pub fn build(self) -> Result<Switchboard<T>, SwitchboardError> {
        let mut index = HashMap::with_capacity(self.sources.len());
        let mut names = Vec::with_capacity(self.sources.len());
        for (position, (name, _)) in self.sources.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(SwitchboardError::DuplicateSource(name.clone()));
            }
            names.push(name.clone());
        }

        let mut board = Switchboard {
            names,
            index,
            slots: self.sources.iter().map(|_| Slot::Empty).collect(),
            pulls: JoinSet::new(),
            outstanding: HashMap::new(),
            ready_count: 0,
            baseline: 0,
            reporter: self.reporter,
        };
        debug!("switchboard starting with {} source(s)", board.names.len());
        for (position, (_, source)) in self.sources.into_iter().enumerate() {
            board.issue(position, source);
        }
        Ok(board)
    }
}

impl<T: Send + 'static> Default for SwitchboardBuilder<T> {
    fn default() -> Self {
        Switchboard::builder()
    }
}
