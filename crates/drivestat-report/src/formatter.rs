//! Rendering of objects and permissions in the three report styles.

use drivestat_core::{PermissionEntry, RemoteObject, ReportOptions, path};

use crate::fields::{metadata_fields, permission_fields};
use crate::logf;
use crate::sink::LogSink;

/// Header row of the CSV report.
pub const CSV_HEADER: &str = "File Name, Type, Name, Email, Role, AccountType";

/// Mutable rendering state of one invocation.
///
/// Create a fresh context per invocation; nothing is shared between them.
#[derive(Debug, Default)]
pub struct ReportContext {
    csv_header_written: bool,
}

impl ReportContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true exactly once, for the first caller.
    fn claim_csv_header(&mut self) -> bool {
        !std::mem::replace(&mut self.csv_header_written, true)
    }
}

/// Renders objects according to a borrowed set of options.
#[derive(Debug, Clone, Copy)]
pub struct ReportFormatter<'a> {
    options: &'a ReportOptions,
}

impl<'a> ReportFormatter<'a> {
    pub fn new(options: &'a ReportOptions) -> Self {
        Self { options }
    }

    /// `<checksum>  <path>` for objects that have a checksum, nothing otherwise.
    pub fn write_checksum(&self, sink: &mut dyn LogSink, display_path: &str, object: &RemoteObject) {
        if let Some(checksum) = object.reported_checksum() {
            logf!(sink, "{:>32}  {}\n", checksum, path::strip_root(display_path));
        }
    }

    /// One CSV row per permission, preceded by the header on first use.
    pub fn write_csv(
        &self,
        sink: &mut dyn LogSink,
        ctx: &mut ReportContext,
        object: &RemoteObject,
        permissions: &[PermissionEntry],
    ) {
        if ctx.claim_csv_header() {
            logf!(sink, "{CSV_HEADER}\n");
        }

        for entry in permissions {
            logf!(
                sink,
                "{:<60},{:<10},{:<25},{:<25}\t\t",
                object.name.as_str(),
                object.kind.to_string(),
                entry.name,
                entry.email
            );
            for field in permission_fields(entry) {
                logf!(sink, ",{:<25}", field.value);
            }
            logf!(sink, "\n");
        }
    }

    /// Highlighted path header followed by the metadata rows.
    pub fn write_metadata(&self, sink: &mut dyn LogSink, display_path: &str, object: &RemoteObject) {
        if self.options.color {
            logf!(sink, "\n\x1b[92m{display_path}\x1b[00m\n");
        } else {
            logf!(sink, "\n{display_path}\n");
        }

        for field in metadata_fields(object) {
            logf!(sink, "{:<25} {:<30}\n", field.label, field.value);
        }
    }

    /// One small block per permission entry.
    pub fn write_permissions(&self, sink: &mut dyn LogSink, permissions: &[PermissionEntry]) {
        for entry in permissions {
            logf!(sink, "\n*\nName: {} <{}>\n", entry.name, entry.email);
            for field in permission_fields(entry) {
                logf!(sink, "{:<20} {:<30}\n", field.label, field.value);
            }
            logf!(sink, "*\n");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::BufferSink;
    use chrono::Utc;
    use drivestat_core::{AccountType, Role};

    fn file(name: &str, checksum: &str) -> RemoteObject {
        RemoteObject::new_file(name, name, 10, checksum, Utc::now())
    }

    #[test]
    fn test_checksum_line_layout() {
        let options = ReportOptions::default();
        let formatter = ReportFormatter::new(&options);
        let mut sink = BufferSink::new();

        formatter.write_checksum(&mut sink, "/a/b", &file("b", "d41d8cd98f00b204e9800998ecf8427e"));
        assert_eq!(sink.contents(), "d41d8cd98f00b204e9800998ecf8427e  a/b\n");
    }

    #[test]
    fn test_short_checksum_is_right_aligned() {
        let options = ReportOptions::default();
        let formatter = ReportFormatter::new(&options);
        let mut sink = BufferSink::new();

        formatter.write_checksum(&mut sink, "/a/b", &file("b", "deadbeef"));
        assert_eq!(sink.contents(), format!("{}deadbeef  a/b\n", " ".repeat(24)));
    }

    #[test]
    fn test_checksum_skips_empty() {
        let options = ReportOptions::default();
        let formatter = ReportFormatter::new(&options);
        let mut sink = BufferSink::new();

        formatter.write_checksum(&mut sink, "/a", &file("a", ""));
        formatter.write_checksum(&mut sink, "/d", &RemoteObject::new_folder("d", "d", Utc::now()));
        assert!(sink.contents().is_empty());
    }

    #[test]
    fn test_csv_header_claimed_once() {
        let mut ctx = ReportContext::new();
        assert!(ctx.claim_csv_header());
        assert!(!ctx.claim_csv_header());
        assert!(ReportContext::new().claim_csv_header());
    }

    #[test]
    fn test_csv_row_layout() {
        let options = ReportOptions::default();
        let formatter = ReportFormatter::new(&options);
        let mut ctx = ReportContext::new();
        let mut sink = BufferSink::new();
        let perms = [PermissionEntry::new("Ann", "ann@example.com", Role::Owner, AccountType::User)];

        formatter.write_csv(&mut sink, &mut ctx, &file("x.txt", ""), &perms);

        let expected_row = format!(
            "{:<60},{:<10},{:<25},{:<25}\t\t,{:<25},{:<25}",
            "x.txt", "file", "Ann", "ann@example.com", "owner", "user"
        );
        assert_eq!(sink.lines(), vec![CSV_HEADER, expected_row.as_str()]);
    }

    #[test]
    fn test_metadata_without_color() {
        let options = ReportOptions::builder().color(false).build().unwrap();
        let formatter = ReportFormatter::new(&options);
        let mut sink = BufferSink::new();

        formatter.write_metadata(&mut sink, "/docs/a.txt", &file("a.txt", "abc"));
        let lines = sink.lines();
        assert_eq!(lines[0], "");
        assert_eq!(lines[1], "/docs/a.txt");
        assert_eq!(lines[2], format!("{:<25} {:<30}", "Filename", "a.txt"));
    }

    #[test]
    fn test_metadata_with_color() {
        let options = ReportOptions::default();
        let formatter = ReportFormatter::new(&options);
        let mut sink = BufferSink::new();

        formatter.write_metadata(&mut sink, "/a", &file("a", "abc"));
        assert!(sink.contents().starts_with("\n\x1b[92m/a\x1b[00m\n"));
    }

    #[test]
    fn test_permission_block() {
        let options = ReportOptions::default();
        let formatter = ReportFormatter::new(&options);
        let mut sink = BufferSink::new();
        let perms = [PermissionEntry::new("Anyone", "", Role::Reader, AccountType::Anyone)];

        formatter.write_permissions(&mut sink, &perms);
        let expected = format!(
            "\n*\nName: Anyone <>\n{:<20} {:<30}\n{:<20} {:<30}\n*\n",
            "Role", "reader", "AccountType", "anyone"
        );
        assert_eq!(sink.contents(), expected);
    }
}
