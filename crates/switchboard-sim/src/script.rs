//! Scripted sources with deterministic timing

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use switchboard::Source;

/// One step of a scripted source
#[derive(Debug, Clone)]
pub enum ScriptStep<T> {
    /// Produce this value
    Yield(T),
    /// Sleep before the next step
    Pause(Duration),
}

/// A source that plays back a fixed script, then exhausts
///
/// Useful for driving consumer code with a known arrival pattern without
/// real producers. Pauses run on tokio's clock, so paused-time tests can
/// fast-forward through them.
pub struct ScriptedSource<T> {
    steps: VecDeque<ScriptStep<T>>,
}

impl<T> ScriptedSource<T> {
    /// Play the given steps in order
    pub fn new(steps: impl IntoIterator<Item = ScriptStep<T>>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Shorthand for a pause-free script of plain values
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Self {
        Self::new(values.into_iter().map(ScriptStep::Yield))
    }

    /// Steps remaining in the script, counting pauses
    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

#[async_trait]
impl<T: Send> Source for ScriptedSource<T> {
    type Item = T;

    async fn pull(&mut self) -> Option<T> {
        while let Some(step) = self.steps.pop_front() {
            match step {
                ScriptStep::Yield(value) => return Some(value),
                ScriptStep::Pause(delay) => tokio::time::sleep(delay).await,
            }
        }
        None
    }
}
