//! Traversal engine for drivestat.
//!
//! This crate walks remote object trees and renders every visited object
//! through a [`drivestat_report::ReportFormatter`].
//!
//! # Overview
//!
//! `drivestat-walk` is responsible for resolving sources, listing folders
//! and recursing up to a depth budget. Key pieces:
//!
//! - **Collaborator traits** ([`Resolver`], [`ChildLister`],
//!   [`PermissionSource`]) so the engine never depends on a backend
//! - **Page streaming** via a bounded channel fed by one producer task per
//!   listing, cancelled when the consumer goes away
//! - **Error aggregation** so one bad source never hides the others
//! - **An in-memory store** loadable from JSON snapshots
//!
//! # Example
//!
//! ```rust,no_run
//! use drivestat_core::{DepthBudget, ReportOptions};
//! use drivestat_report::BufferSink;
//! use drivestat_walk::{Snapshot, TraversalEngine};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Snapshot::load("drive.json")?.into_store()?;
//! let options = ReportOptions::builder().checksum_only(true)
//!     .depth(DepthBudget::Unlimited)
//!     .build()?;
//!
//! let mut sink = BufferSink::new();
//! let stats = TraversalEngine::new(&store, &options)
//!     .stat_by_path(["/"], &mut sink)
//!     .await?;
//!
//! print!("{}", sink.contents());
//! println!("{} objects", stats.objects_rendered);
//! # Ok(())
//! # }
//! ```

mod engine;
mod memory;
mod page_stream;
mod progress;
mod remote;
mod snapshot;

pub use engine::{Traversal, TraversalEngine, sort_by_checksum};
pub use memory::{DEFAULT_PAGE_SIZE, MemoryStore, StoreError};
pub use page_stream::{PAGE_CHANNEL_SIZE, PageSink, PageStream};
pub use progress::TraversalStats;
pub use remote::{
    BoxFuture, ChildLister, PermissionSource, RemoteStore, ResolveMode, Resolver,
    TraversalRequest,
};
pub use snapshot::{Snapshot, SnapshotError, SnapshotNode};

// Re-export core types
pub use drivestat_core::{AggregatedError, DepthBudget, ReportOptions, StatError, StatusCode};
