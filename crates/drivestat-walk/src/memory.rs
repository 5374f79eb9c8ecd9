//! In-memory remote store.

use std::collections::HashMap;

use thiserror::Error;

use drivestat_core::{ObjectId, PermissionEntry, RemoteError, RemoteObject, path};

use crate::page_stream::PageStream;
use crate::remote::{BoxFuture, ChildLister, PermissionSource, Resolver};

/// Default number of children per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Errors while populating a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("duplicate object id: {0}")]
    DuplicateId(ObjectId),

    #[error("unknown parent: {0}")]
    UnknownParent(ObjectId),

    #[error("parent is not a folder: {0}")]
    NotAFolder(ObjectId),
}

#[derive(Debug, Clone)]
struct ListingFailure {
    after_pages: usize,
    error: RemoteError,
}

/// A remote store held entirely in memory.
///
/// Listings are paginated and delivered by a background task exactly like a
/// network-backed store would. Failures can be injected per object.
#[derive(Debug)]
pub struct MemoryStore {
    root: ObjectId,
    objects: HashMap<ObjectId, RemoteObject>,
    children: HashMap<ObjectId, Vec<ObjectId>>,
    permissions: HashMap<ObjectId, Vec<PermissionEntry>>,
    permission_failures: HashMap<ObjectId, RemoteError>,
    listing_failures: HashMap<ObjectId, ListingFailure>,
    page_size: usize,
}

impl MemoryStore {
    /// Create a store whose root is `root`.
    pub fn new(root: RemoteObject) -> Result<Self, StoreError> {
        if !root.is_container() {
            return Err(StoreError::NotAFolder(root.id));
        }
        let id = root.id.clone();
        Ok(Self {
            root: id.clone(),
            objects: HashMap::from([(id.clone(), root)]),
            children: HashMap::from([(id, Vec::new())]),
            permissions: HashMap::new(),
            permission_failures: HashMap::new(),
            listing_failures: HashMap::new(),
            page_size: DEFAULT_PAGE_SIZE,
        })
    }

    /// Set the number of children per listing page (at least one).
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn root_id(&self) -> &ObjectId {
        &self.root
    }

    /// Number of objects, root included.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add `object` as the last child of `parent`.
    pub fn insert(&mut self, parent: &ObjectId, object: RemoteObject) -> Result<ObjectId, StoreError> {
        if self.objects.contains_key(&object.id) {
            return Err(StoreError::DuplicateId(object.id));
        }
        match self.objects.get(parent) {
            None => return Err(StoreError::UnknownParent(parent.clone())),
            Some(p) if !p.is_container() => return Err(StoreError::NotAFolder(parent.clone())),
            Some(_) => {}
        }

        let id = object.id.clone();
        if object.is_container() {
            self.children.insert(id.clone(), Vec::new());
        }
        self.children.entry(parent.clone()).or_default().push(id.clone());
        self.objects.insert(id.clone(), object);
        Ok(id)
    }

    /// Attach permission entries to an object.
    pub fn set_permissions(&mut self, id: &ObjectId, entries: Vec<PermissionEntry>) {
        self.permissions.insert(id.clone(), entries);
    }

    /// Make permission lookups for `id` fail.
    pub fn fail_permissions(&mut self, id: &ObjectId, error: RemoteError) {
        self.permission_failures.insert(id.clone(), error);
    }

    /// Make listings of `id` fail before the first page.
    pub fn fail_listing(&mut self, id: &ObjectId, error: RemoteError) {
        self.fail_listing_after(id, 0, error);
    }

    /// Make listings of `id` fail after `pages` full pages were delivered.
    pub fn fail_listing_after(&mut self, id: &ObjectId, pages: usize, error: RemoteError) {
        self.listing_failures.insert(
            id.clone(),
            ListingFailure {
                after_pages: pages,
                error,
            },
        );
    }

    fn lookup_path(&self, requested: &str) -> Result<RemoteObject, RemoteError> {
        let normalized = path::normalize(&format!("/{requested}"));
        let mut current = &self.root;

        for segment in normalized.split('/').filter(|s| !s.is_empty()) {
            let candidates: Vec<&ObjectId> = self
                .children
                .get(current)
                .into_iter()
                .flatten()
                .filter(|id| self.objects.get(*id).is_some_and(|o| o.name == segment))
                .collect();

            current = match candidates.as_slice() {
                [] => return Err(RemoteError::not_found(requested)),
                [only] => only,
                many => {
                    return Err(RemoteError::Ambiguous {
                        what: requested.to_string(),
                        count: many.len(),
                    });
                }
            };
        }

        self.objects
            .get(current)
            .cloned()
            .ok_or_else(|| RemoteError::not_found(requested))
    }
}

impl Resolver for MemoryStore {
    fn resolve_by_path<'a>(
        &'a self,
        path: &'a str,
    ) -> BoxFuture<'a, Result<RemoteObject, RemoteError>> {
        Box::pin(async move { self.lookup_path(path) })
    }

    fn resolve_by_id<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<RemoteObject, RemoteError>> {
        Box::pin(async move {
            self.objects
                .get(id)
                .cloned()
                .ok_or_else(|| RemoteError::not_found(id))
        })
    }
}

impl ChildLister for MemoryStore {
    fn list_children(&self, parent: &ObjectId, include_hidden: bool) -> PageStream {
        let Some(ids) = self.children.get(parent) else {
            return PageStream::failed(RemoteError::not_found(parent.as_str()));
        };

        let children: Vec<RemoteObject> = ids
            .iter()
            .filter_map(|id| self.objects.get(id))
            .filter(|child| include_hidden || !child.is_hidden())
            .cloned()
            .collect();
        let page_size = self.page_size;
        let failure = self.listing_failures.get(parent).cloned();
        let parent = parent.clone();

        PageStream::spawn(move |sink| async move {
            let pages: Vec<Vec<RemoteObject>> =
                children.chunks(page_size).map(<[RemoteObject]>::to_vec).collect();
            let page_count = pages.len();

            for (index, page) in pages.into_iter().enumerate() {
                if sink.is_cancelled() {
                    tracing::debug!(parent = %parent, delivered = index, "listing cancelled by consumer");
                    return;
                }
                if let Some(failure) = failure.as_ref().filter(|f| f.after_pages == index) {
                    sink.fail(failure.error.clone()).await;
                    return;
                }
                if sink.send_page(page).await.is_err() {
                    tracing::debug!(parent = %parent, "listing cancelled by consumer");
                    return;
                }
            }

            if let Some(failure) = failure.filter(|f| f.after_pages >= page_count) {
                sink.fail(failure.error).await;
            }
        })
    }
}

impl PermissionSource for MemoryStore {
    fn list_permissions<'a>(
        &'a self,
        id: &'a ObjectId,
    ) -> BoxFuture<'a, Result<Vec<PermissionEntry>, RemoteError>> {
        Box::pin(async move {
            if let Some(error) = self.permission_failures.get(id) {
                return Err(error.clone());
            }
            if !self.objects.contains_key(id) {
                return Err(RemoteError::not_found(id.as_str()));
            }
            Ok(self.permissions.get(id).cloned().unwrap_or_default())
        })
    }
}
