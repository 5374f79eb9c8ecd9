//! Recursive stat traversal over a remote store.

use drivestat_core::{
    AggregatedError, DepthBudget, ErrorAggregator, PermissionEntry, RemoteObject, ReportMode,
    ReportOptions, StatError, path,
};
use drivestat_report::{LogSink, ReportContext, ReportFormatter};

use crate::progress::{StatsTracker, TraversalStats};
use crate::remote::{BoxFuture, RemoteStore, ResolveMode, TraversalRequest};

/// Walks remote trees and renders every visited object.
///
/// The engine itself is stateless; every call to [`run`](Self::run) (or the
/// `stat_by_*` shortcuts) starts a fresh [`Traversal`] with its own CSV header
/// guard, statistics and error aggregator.
pub struct TraversalEngine<'a, S: RemoteStore + ?Sized> {
    store: &'a S,
    options: &'a ReportOptions,
}

impl<'a, S: RemoteStore + ?Sized> TraversalEngine<'a, S> {
    pub fn new(store: &'a S, options: &'a ReportOptions) -> Self {
        Self { store, options }
    }

    /// Report on every source, each resolved as a path.
    pub async fn stat_by_path<I>(
        &self,
        sources: I,
        sink: &mut (dyn LogSink + Send),
    ) -> Result<TraversalStats, AggregatedError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.run(sources.into_iter().map(TraversalRequest::by_path), sink)
            .await
    }

    /// Report on every source, each resolved as an object id.
    pub async fn stat_by_id<I>(
        &self,
        sources: I,
        sink: &mut (dyn LogSink + Send),
    ) -> Result<TraversalStats, AggregatedError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.run(sources.into_iter().map(TraversalRequest::by_id), sink)
            .await
    }

    /// Resolve and report on every request in order.
    ///
    /// A failing source never stops the remaining ones. All failures, including
    /// those of subtrees that did not stop their siblings, come back together
    /// as one [`AggregatedError`].
    pub async fn run<I>(
        &self,
        requests: I,
        sink: &mut (dyn LogSink + Send),
    ) -> Result<TraversalStats, AggregatedError>
    where
        I: IntoIterator<Item = TraversalRequest>,
    {
        let mut traversal = Traversal::new(self.store, self.options, sink);

        for request in requests {
            let operation = request.mode.operation();
            let object = match request.mode.resolve(self.store, &request.source).await {
                Ok(object) => object,
                Err(err) => {
                    let err = StatError::from(err);
                    tracing::warn!(source = %request.source, error = %err, "could not resolve source");
                    traversal.errors.record(operation, &request.source, &err);
                    continue;
                }
            };
            traversal.stats.record_source();

            let target = self.display_target(&request, &object);
            if let Err(err) = traversal.stat(&target, &object, self.options.depth).await {
                traversal.errors.record(operation, &target, &err);
            }
        }

        traversal.finish()
    }

    /// Path shown for a resolved source.
    ///
    /// Checksum reports label entries by object name. When `root_is_trivial`
    /// is set, a source that designates the store root gets no label at all so
    /// its children print as plain relative paths. Other sources of the same
    /// invocation keep their names.
    fn display_target(&self, request: &TraversalRequest, object: &RemoteObject) -> String {
        if self.options.mode() != ReportMode::Checksum {
            return request.source.clone();
        }
        let at_root = request.mode == ResolveMode::ByPath && path::is_root_like(&request.source);
        if object.is_container() && self.options.root_is_trivial && at_root {
            String::new()
        } else {
            object.name.to_string()
        }
    }
}

/// State of one invocation: output, header guard, statistics and failures.
pub struct Traversal<'a, 's, S: RemoteStore + ?Sized> {
    store: &'a S,
    options: &'a ReportOptions,
    sink: &'s mut (dyn LogSink + Send),
    ctx: ReportContext,
    stats: StatsTracker,
    errors: ErrorAggregator,
}

impl<'a, 's, S: RemoteStore + ?Sized> Traversal<'a, 's, S> {
    pub fn new(store: &'a S, options: &'a ReportOptions, sink: &'s mut (dyn LogSink + Send)) -> Self {
        Self {
            store,
            options,
            sink,
            ctx: ReportContext::new(),
            stats: StatsTracker::new(),
            errors: ErrorAggregator::new(),
        }
    }

    /// Render `object`, then descend into its children while `depth` allows.
    ///
    /// The object is always rendered first. A permission failure in verbose
    /// mode and a failed child listing are returned; failures further down
    /// are recorded on the traversal and do not stop sibling subtrees.
    pub fn stat<'b>(
        &'b mut self,
        display_path: &'b str,
        object: &'b RemoteObject,
        depth: DepthBudget,
    ) -> BoxFuture<'b, Result<(), StatError>> {
        Box::pin(async move {
            tracing::debug!(path = display_path, id = %object.id, %depth, "stat");
            self.render(display_path, object).await?;

            if depth.is_exhausted() || !object.is_container() {
                return Ok(());
            }

            let mut children = self.list_children(display_path, object).await?;
            if self.options.mode() == ReportMode::Checksum {
                sort_by_checksum(&mut children);
            }

            let depth = depth.descend();
            for child in &children {
                let child_path = path::join(display_path, &child.name);
                if let Err(err) = self.stat(&child_path, child, depth).await {
                    tracing::warn!(path = %child_path, error = %err, "subtree failed, continuing");
                    self.errors.record_subtree(&child_path, &err);
                }
            }
            Ok(())
        })
    }

    async fn render(&mut self, display_path: &str, object: &RemoteObject) -> Result<(), StatError> {
        let formatter = ReportFormatter::new(self.options);
        self.stats.record_render();

        match self.options.mode() {
            ReportMode::Checksum => {
                formatter.write_checksum(&mut *self.sink, display_path, object);
                Ok(())
            }
            ReportMode::Csv => {
                let permissions = match self.permissions(object).await {
                    Ok(permissions) => permissions,
                    Err(err) => {
                        tracing::warn!(path = display_path, error = %err, "skipping permissions");
                        Vec::new()
                    }
                };
                formatter.write_csv(&mut *self.sink, &mut self.ctx, object, &permissions);
                Ok(())
            }
            ReportMode::Verbose => {
                let permissions = self.permissions(object).await;
                formatter.write_metadata(&mut *self.sink, display_path, object);
                let permissions = permissions?;
                formatter.write_permissions(&mut *self.sink, &permissions);
                Ok(())
            }
        }
    }

    async fn permissions(&mut self, object: &RemoteObject) -> Result<Vec<PermissionEntry>, StatError> {
        self.stats.record_permission_lookup();
        self.store
            .list_permissions(&object.id)
            .await
            .map_err(|source| StatError::Permissions {
                object: object.id.to_string(),
                source,
            })
    }

    async fn list_children(
        &mut self,
        display_path: &str,
        object: &RemoteObject,
    ) -> Result<Vec<RemoteObject>, StatError> {
        let mut stream = self
            .store
            .list_children(&object.id, self.options.include_hidden);
        let children = stream.collect().await.map_err(|source| StatError::Listing {
            parent: display_path.to_string(),
            source,
        })?;
        self.stats.record_listing(stream.pages());
        Ok(children)
    }

    /// Close the invocation, yielding stats or every recorded failure.
    pub fn finish(self) -> Result<TraversalStats, AggregatedError> {
        let stats = self.stats.snapshot();
        tracing::info!(
            rendered = stats.objects_rendered,
            expanded = stats.containers_expanded,
            failures = self.errors.len(),
            elapsed_ms = stats.elapsed.as_millis() as u64,
            "traversal finished"
        );
        self.errors.finish().map(|()| stats)
    }
}

/// Order children by checksum, then name.
///
/// Plain string order, so children without a checksum (folders included)
/// come first. The sort is stable.
pub fn sort_by_checksum(children: &mut [RemoteObject]) {
    children.sort_by(|a, b| {
        a.sort_checksum()
            .cmp(b.sort_checksum())
            .then_with(|| a.name.cmp(&b.name))
    });
}
