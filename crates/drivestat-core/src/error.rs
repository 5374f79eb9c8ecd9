//! Error types for remote lookups and stat operations.

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Failure category retained across a whole invocation.
///
/// Variants are declared from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum StatusCode {
    /// A path or id matched nothing.
    NotFound,
    /// A path matched more than one object.
    Ambiguous,
    /// The store refused access.
    PermissionDenied,
    /// Transport-level failure talking to the store.
    Network,
    /// The operation was cancelled before completing.
    Cancelled,
}

impl StatusCode {
    /// Process exit code for this status.
    pub fn exit_code(&self) -> i32 {
        match self {
            StatusCode::NotFound => 2,
            StatusCode::Ambiguous => 3,
            StatusCode::PermissionDenied => 4,
            StatusCode::Network => 5,
            StatusCode::Cancelled => 6,
        }
    }
}

/// Errors reported by the remote store collaborators.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Nothing matched the path or id.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// A path segment matched several objects.
    #[error("ambiguous path {what}: {count} matches")]
    Ambiguous { what: String, count: usize },

    /// Access to the object was refused.
    #[error("permission denied: {what}")]
    PermissionDenied { what: String },

    /// The backend could not be reached or answered garbage.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The request was abandoned.
    #[error("operation cancelled")]
    Cancelled,
}

impl RemoteError {
    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RemoteError::NotFound { .. } => StatusCode::NotFound,
            RemoteError::Ambiguous { .. } => StatusCode::Ambiguous,
            RemoteError::PermissionDenied { .. } => StatusCode::PermissionDenied,
            RemoteError::Transport { .. } => StatusCode::Network,
            RemoteError::Cancelled => StatusCode::Cancelled,
        }
    }
}

/// Errors produced while statting one object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatError {
    /// The source could not be resolved to an object.
    #[error("{source}")]
    Resolve {
        #[source]
        source: RemoteError,
    },

    /// Fetching the permission list failed.
    #[error("listing permissions of {object}: {source}")]
    Permissions {
        object: String,
        #[source]
        source: RemoteError,
    },

    /// Streaming the children of a folder failed.
    #[error("listing children of {parent}: {source}")]
    Listing {
        parent: String,
        #[source]
        source: RemoteError,
    },
}

impl StatError {
    /// The remote failure underneath this error.
    pub fn remote(&self) -> &RemoteError {
        match self {
            StatError::Resolve { source }
            | StatError::Permissions { source, .. }
            | StatError::Listing { source, .. } => source,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.remote().status()
    }
}

impl From<RemoteError> for StatError {
    fn from(source: RemoteError) -> Self {
        StatError::Resolve { source }
    }
}
