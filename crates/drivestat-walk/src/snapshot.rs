//! JSON snapshots of a remote tree.
//!
//! A snapshot is a single root node; every node carries the object metadata
//! inline, plus its permission entries and children:
//!
//! ```json
//! {
//!   "page_size": 50,
//!   "root": {
//!     "id": "root", "name": "My Drive", "kind": "folder",
//!     "children": [
//!       { "id": "f1", "name": "notes.txt", "size": 12, "checksum": "deadbeef",
//!         "permissions": [ { "name": "Ann", "email": "ann@example.com",
//!                            "role": "owner", "account_type": "user" } ] }
//!     ]
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use drivestat_core::{ObjectId, PermissionEntry, RemoteObject};

use crate::memory::{MemoryStore, StoreError};

/// Errors while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("inconsistent snapshot: {0}")]
    Store(#[from] StoreError),
}

/// One object in a snapshot together with its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    #[serde(flatten)]
    pub object: RemoteObject,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<PermissionEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SnapshotNode>,
}

impl SnapshotNode {
    pub fn new(object: RemoteObject) -> Self {
        Self {
            object,
            permissions: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<PermissionEntry>) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_child(mut self, child: SnapshotNode) -> Self {
        self.children.push(child);
        self
    }
}

/// A whole tree as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub root: SnapshotNode,
    /// Listing page size to simulate; the store default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
}

impl Snapshot {
    pub fn new(root: SnapshotNode) -> Self {
        Self {
            root,
            page_size: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "snapshot loaded");
        Ok(snapshot)
    }

    /// Build a [`MemoryStore`] holding the whole tree.
    ///
    /// Children keep their snapshot order.
    pub fn into_store(self) -> Result<MemoryStore, SnapshotError> {
        let SnapshotNode {
            object,
            permissions,
            children,
        } = self.root;
        let root_id = object.id.clone();

        let mut store = MemoryStore::new(object)?;
        if let Some(page_size) = self.page_size {
            store = store.with_page_size(page_size);
        }
        if !permissions.is_empty() {
            store.set_permissions(&root_id, permissions);
        }

        let mut pending: Vec<(ObjectId, SnapshotNode)> =
            children.into_iter().rev().map(|c| (root_id.clone(), c)).collect();
        while let Some((parent, node)) = pending.pop() {
            let id = store.insert(&parent, node.object)?;
            if !node.permissions.is_empty() {
                store.set_permissions(&id, node.permissions);
            }
            pending.extend(node.children.into_iter().rev().map(|c| (id.clone(), c)));
        }

        tracing::debug!(objects = store.len(), "memory store built from snapshot");
        Ok(store)
    }
}
