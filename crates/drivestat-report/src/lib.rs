//! Report rendering for drivestat.
//!
//! Three output styles are supported, selected by
//! [`ReportOptions::mode`](drivestat_core::ReportOptions::mode):
//!
//! - **Checksum** - `<checksum>  <path>` per file, suitable for `md5sum -c`
//! - **CSV** - one row per permission entry, with a single header row per
//!   invocation
//! - **Verbose** - a highlighted path header, the metadata rows and one block
//!   per permission entry
//!
//! All output goes through a [`LogSink`], so the formatter has no side
//! effects of its own.
//!
//! ```rust
//! use drivestat_core::{RemoteObject, ReportOptions};
//! use drivestat_report::{BufferSink, ReportFormatter};
//!
//! let options = ReportOptions::default();
//! let formatter = ReportFormatter::new(&options);
//! let mut sink = BufferSink::new();
//!
//! let file = RemoteObject::new_file(
//!     "id",
//!     "b",
//!     8,
//!     "0123456789abcdef0123456789abcdef",
//!     Default::default(),
//! );
//! formatter.write_checksum(&mut sink, "/a/b", &file);
//! assert_eq!(sink.contents(), "0123456789abcdef0123456789abcdef  a/b\n");
//! ```

mod fields;
mod formatter;
mod sink;

pub use fields::{Field, NEVER, metadata_fields, permission_fields};
pub use formatter::{CSV_HEADER, ReportContext, ReportFormatter};
pub use sink::{BufferSink, LogSink, WriterSink};

// Re-export core types
pub use drivestat_core::{PermissionEntry, RemoteObject, ReportMode, ReportOptions};
