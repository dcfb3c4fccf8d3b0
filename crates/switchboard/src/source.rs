//! The pull boundary between the switchboard and its producers
//!
//! A `Source` is anything that can be asked for its next value. A pull
//! resolves with `Some(value)`, or with `None` as the permanent exhaustion
//! signal; once a source returns `None` the switchboard never pulls it
//! again.
//!
//! Adapters are provided for tokio mpsc receivers and, through
//! `StreamSource`, for any `futures` stream, so ordinary channels and
//! streams can be registered without boilerplate.

use async_trait::async_trait;
use futures::{Stream, StreamExt};
use tokio::sync::mpsc;

/// A producer of an asynchronous sequence of values
///
/// The switchboard keeps at most one `pull` in flight per source and
/// only ever asks for values, never pushes anything back.
#[async_trait]
pub trait Source: Send {
    /// The type of value this source produces
    type Item;

    /// Resolve with the next value, or `None` once permanently exhausted
    ///
    /// After returning `None` the source is never pulled again. A pull may
    /// suspend indefinitely; bounding the wait is the consumer's concern.
    async fn pull(&mut self) -> Option<Self::Item>;
}

/// A boxed source, as stored behind each registration
pub type BoxSource<T> = Box<dyn Source<Item = T>>;

#[async_trait]
impl<T: Send> Source for mpsc::Receiver<T> {
    type Item = T;

    async fn pull(&mut self) -> Option<T> {
        self.recv().await
    }
}

#[async_trait]
impl<T: Send> Source for mpsc::UnboundedReceiver<T> {
    type Item = T;

    async fn pull(&mut self) -> Option<T> {
        self.recv().await
    }
}

/// Adapter that registers any stream as a source
///
/// A blanket impl over streams would collide with the receiver impls, so
/// the wrapping is explicit.
pub struct StreamSource<S> {
    inner: S,
}

impl<S> StreamSource<S> {
    /// Wrap a stream for registration
    pub fn new(stream: S) -> Self {
        Self { inner: stream }
    }

    /// Unwrap the adapter, returning the stream
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[async_trait]
impl<S> Source for StreamSource<S>
where
    S: Stream + Unpin + Send,
    S::Item: Send,
{
    type Item = S::Item;

    async fn pull(&mut self) -> Option<S::Item> {
        self.inner.next().await
    }
}
