//! Streaming of paginated child listings.
//!
//! A listing runs as one background task (the producer) that pushes the
//! children of a folder page by page into a bounded channel, while the
//! traversal (the consumer) drains it. Each channel item is either a child or
//! an error, and channel closure marks the end of the listing, so "done" and
//! "failed" can never be confused.
//!
//! Dropping a [`PageStream`] cancels the producer.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use drivestat_core::{RemoteError, RemoteObject};

/// Default channel buffer size for listing items.
pub const PAGE_CHANNEL_SIZE: usize = 100;

type Item = Result<RemoteObject, RemoteError>;

/// Consumer half of a listing.
#[derive(Debug)]
pub struct PageStream {
    rx: mpsc::Receiver<Item>,
    cancel: CancellationToken,
    pages: Arc<AtomicU64>,
}

/// Producer half of a listing.
#[derive(Debug)]
pub struct PageSink {
    tx: mpsc::Sender<Item>,
    cancel: CancellationToken,
    pages: Arc<AtomicU64>,
}

impl PageStream {
    /// Create a connected sink/stream pair.
    pub fn channel() -> (PageSink, PageStream) {
        let (tx, rx) = mpsc::channel(PAGE_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let pages = Arc::new(AtomicU64::new(0));

        let sink = PageSink {
            tx,
            cancel: cancel.clone(),
            pages: Arc::clone(&pages),
        };
        let stream = PageStream { rx, cancel, pages };
        (sink, stream)
    }

    /// Run `producer` as a background task feeding the returned stream.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<F, Fut>(producer: F) -> PageStream
    where
        F: FnOnce(PageSink) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (sink, stream) = Self::channel();
        tokio::spawn(producer(sink));
        stream
    }

    /// A stream that yields `err` and then ends, without any task.
    pub fn failed(err: RemoteError) -> PageStream {
        let (sink, stream) = Self::channel();
        // Capacity is never zero, so the first send always fits.
        let _ = sink.tx.try_send(Err(err));
        stream
    }

    /// Next child, an error, or `None` once the producer has finished.
    pub async fn next(&mut self) -> Option<Item> {
        self.rx.recv().await
    }

    /// Drain the listing.
    ///
    /// Stops at the first error, cancels the producer and returns the error;
    /// children received before it are discarded.
    pub async fn collect(&mut self) -> Result<Vec<RemoteObject>, RemoteError> {
        let mut children = Vec::new();
        while let Some(item) = self.next().await {
            match item {
                Ok(child) => children.push(child),
                Err(err) => {
                    self.cancel();
                    return Err(err);
                }
            }
        }
        Ok(children)
    }

    /// Pages the producer has fully delivered so far.
    pub fn pages(&self) -> u64 {
        self.pages.load(Ordering::Relaxed)
    }

    /// Ask the producer to stop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for PageStream {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl PageSink {
    /// Deliver one page of children, in order.
    ///
    /// Fails with [`RemoteError::Cancelled`] once the consumer has gone away
    /// or cancelled the listing; the producer should stop fetching then.
    pub async fn send_page(&self, page: Vec<RemoteObject>) -> Result<(), RemoteError> {
        for child in page {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(RemoteError::Cancelled),
                sent = self.tx.send(Ok(child)) => {
                    sent.map_err(|_| RemoteError::Cancelled)?;
                }
            }
        }
        self.pages.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Report a listing failure and close the stream.
    pub async fn fail(self, err: RemoteError) {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {}
            _ = self.tx.send(Err(err)) => {}
        }
    }

    /// Whether the consumer has cancelled the listing or gone away.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.is_closed()
    }
}
