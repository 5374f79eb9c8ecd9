//! Core types for drivestat.
//!
//! This crate provides the data model shared by the report and traversal
//! crates: remote objects and their permissions, report options, the error
//! taxonomy and the aggregator that folds per-source failures into one
//! composite error.

mod aggregate;
mod config;
mod error;
mod object;
pub mod path;

pub use aggregate::{AggregatedError, ErrorAggregator};
pub use config::{DepthBudget, ReportMode, ReportOptions, ReportOptionsBuilder};
pub use error::{RemoteError, StatError, StatusCode};
pub use object::{
    AccountType, FOLDER_MIME_TYPE, Labels, ObjectId, ObjectKind, PermissionEntry, RemoteObject,
    Role,
};
