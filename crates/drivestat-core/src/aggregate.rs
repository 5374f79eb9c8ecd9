//! Combining failures from independent traversals into one error.

use thiserror::Error;

use crate::error::{StatError, StatusCode};

/// Every failure of one invocation, in the order they were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .messages.join("\n"))]
pub struct AggregatedError {
    messages: Vec<String>,
    status: StatusCode,
}

impl AggregatedError {
    /// Individual failure messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The most severe status seen.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Accumulates per-source and per-subtree failures.
///
/// Root failures always precede subtree failures in the final message,
/// each group keeping its recording order.
#[derive(Debug, Default)]
pub struct ErrorAggregator {
    roots: Vec<String>,
    subtrees: Vec<String>,
    status: Option<StatusCode>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the failure of a top-level source.
    pub fn record(&mut self, operation: &str, source: &str, err: &StatError) {
        self.roots.push(format!("{operation}: {source} err: {err}"));
        self.raise(err.status());
    }

    /// Record a failure below a source that did not stop its siblings.
    pub fn record_subtree(&mut self, path: &str, err: &StatError) {
        self.subtrees.push(format!("subtree: {path} err: {err}"));
        self.raise(err.status());
    }

    /// Number of failures recorded so far.
    pub fn len(&self) -> usize {
        self.roots.len() + self.subtrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Higher severity replaces the retained code; ties keep the first one.
    fn raise(&mut self, status: StatusCode) {
        match self.status {
            Some(current) if current >= status => {}
            _ => self.status = Some(status),
        }
    }

    /// Finish aggregation, yielding an error if anything failed.
    pub fn finish(self) -> Result<(), AggregatedError> {
        match self.status {
            None => Ok(()),
            Some(status) => {
                let mut messages = self.roots;
                messages.extend(self.subtrees);
                Err(AggregatedError { messages, status })
            }
        }
    }
}
