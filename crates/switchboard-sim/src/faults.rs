//! Fault-injecting sources for exercising failure paths

use std::marker::PhantomData;

use async_trait::async_trait;
use switchboard::Source;

/// A source whose pull never resolves
///
/// Models a stuck producer, for exercising caller-side deadlines and
/// teardown while a pull is outstanding.
pub struct PendingSource<T> {
    _marker: PhantomData<T>,
}

impl<T> PendingSource<T> {
    /// Create a source that will never produce anything
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for PendingSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Send> Source for PendingSource<T> {
    type Item = T;

    async fn pull(&mut self) -> Option<T> {
        std::future::pending().await
    }
}

/// A source whose pull panics with a fixed message
///
/// The panic reaches the consumer as a pull failure attributed to the
/// source's registered name, which is how failure-path tests tell a
/// broken source from an exhausted one.
pub struct PanicSource<T> {
    message: String,
    _marker: PhantomData<T>,
}

impl<T> PanicSource<T> {
    /// Create a source that panics with `message` when pulled
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Send> Source for PanicSource<T> {
    type Item = T;

    async fn pull(&mut self) -> Option<T> {
        panic!("{}", self.message)
    }
}
