//! Label/value rows describing an object or a permission.

use humansize::{BINARY, format_size};
use itertools::Itertools;

use drivestat_core::{PermissionEntry, RemoteObject};

/// One labelled row of the verbose report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
}

impl Field {
    fn new(label: &'static str, value: impl ToString) -> Self {
        Self {
            label,
            value: value.to_string(),
        }
    }
}

/// Value shown for a timestamp the store never recorded.
pub const NEVER: &str = "never";

/// Rows for an object, in report order.
///
/// Fixed rows come first; description, original name, checksum/copyable and
/// labels follow only when they apply.
pub fn metadata_fields(object: &RemoteObject) -> Vec<Field> {
    let mut fields = vec![
        Field::new("Filename", &object.name),
        Field::new("FileId", &object.id),
        Field::new("Bytes", object.size),
        Field::new("Size", format_size(object.size, BINARY)),
        Field::new("QuotaBytesUsed", object.quota_bytes_used),
        Field::new("DirType", object.kind),
        Field::new("VersionNumber", object.version),
        Field::new("MimeType", &object.mime_type),
        Field::new("Etag", &object.etag),
        Field::new("ModTime", object.modified),
        Field::new(
            "LastViewedByMe",
            object
                .last_viewed
                .map_or_else(|| NEVER.to_string(), |t| t.to_string()),
        ),
        Field::new("Shared", object.shared),
        Field::new("Owners", object.owners.iter().join(" & ")),
        Field::new("LastModifyingUsername", &object.last_modifying_user),
    ];

    if !object.description.is_empty() {
        fields.push(Field::new("Description", format!("{:?}", object.description)));
    }

    if let Some(original) = object.renamed_from() {
        fields.push(Field::new("OriginalFilename", original));
    }

    if !object.is_container() {
        fields.push(Field::new("Md5Checksum", &object.checksum));
        fields.push(Field::new("Copyable", object.copyable));
    }

    if let Some(labels) = object.labels {
        fields.extend([
            Field::new("Starred", labels.starred),
            Field::new("Viewed", labels.viewed),
            Field::new("Trashed", labels.trashed),
            Field::new("ViewersCanDownload", labels.restricted),
        ]);
    }

    fields
}

/// Rows for a single permission entry.
pub fn permission_fields(entry: &PermissionEntry) -> [Field; 2] {
    [
        Field::new("Role", entry.role),
        Field::new("AccountType", entry.account_type),
    ]
}
