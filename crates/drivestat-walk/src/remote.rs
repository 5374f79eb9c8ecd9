//! Collaborator traits for the remote store.
//!
//! The traversal engine never talks to a backend directly; it only sees these
//! traits. [`MemoryStore`](crate::MemoryStore) implements all of them.

use std::future::Future;
use std::pin::Pin;

use drivestat_core::{ObjectId, PermissionEntry, RemoteError, RemoteObject};

use crate::page_stream::PageStream;

/// Type alias for boxed futures returned by collaborator methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Maps a source string to exactly one object.
pub trait Resolver: Send + Sync {
    /// Resolve a slash-separated path from the store root.
    fn resolve_by_path<'a>(&'a self, path: &'a str)
    -> BoxFuture<'a, Result<RemoteObject, RemoteError>>;

    /// Resolve an object identifier.
    fn resolve_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<RemoteObject, RemoteError>>;
}

/// Streams the children of a folder.
pub trait ChildLister: Send + Sync {
    /// Start listing `parent`. Must be called from within a tokio runtime.
    fn list_children(&self, parent: &ObjectId, include_hidden: bool) -> PageStream;
}

/// Supplies the access-control entries of an object.
pub trait PermissionSource: Send + Sync {
    fn list_permissions<'a>(
        &'a self,
        id: &'a ObjectId,
    ) -> BoxFuture<'a, Result<Vec<PermissionEntry>, RemoteError>>;
}

/// Everything the traversal engine needs from a backend.
pub trait RemoteStore: Resolver + ChildLister + PermissionSource {}

impl<T: Resolver + ChildLister + PermissionSource + ?Sized> RemoteStore for T {}

/// How a source string is turned into an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    ByPath,
    ById,
}

impl ResolveMode {
    /// Operation name used in failure messages.
    pub fn operation(&self) -> &'static str {
        match self {
            ResolveMode::ByPath => "stat",
            ResolveMode::ById => "statById",
        }
    }

    pub(crate) async fn resolve<S: Resolver + ?Sized>(
        &self,
        store: &S,
        source: &str,
    ) -> Result<RemoteObject, RemoteError> {
        match self {
            ResolveMode::ByPath => store.resolve_by_path(source).await,
            ResolveMode::ById => store.resolve_by_id(source).await,
        }
    }
}

/// One source to report on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalRequest {
    /// Path or identifier, depending on `mode`.
    pub source: String,
    pub mode: ResolveMode,
}

impl TraversalRequest {
    pub fn by_path(path: impl Into<String>) -> Self {
        Self {
            source: path.into(),
            mode: ResolveMode::ByPath,
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            source: id.into(),
            mode: ResolveMode::ById,
        }
    }
}
