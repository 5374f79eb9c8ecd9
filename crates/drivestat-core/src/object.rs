//! Remote object and permission types.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Opaque identifier of an object in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub CompactString);

impl ObjectId {
    /// Create a new ObjectId from anything string-like.
    pub fn new(id: impl Into<CompactString>) -> Self {
        Self(id.into())
    }

    /// Get the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Whether an object is a plain file or a container of other objects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ObjectKind {
    /// Regular file.
    #[default]
    File,
    /// Folder that can hold children.
    Folder,
}

impl ObjectKind {
    /// Check if this kind can hold children.
    pub fn is_container(&self) -> bool {
        matches!(self, ObjectKind::Folder)
    }
}

/// Optional label flags attached to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Labels {
    pub starred: bool,
    pub viewed: bool,
    pub trashed: bool,
    /// Viewers are not allowed to download, print or copy.
    pub restricted: bool,
}

/// A single file or folder in the remote store.
///
/// Values are built from collaborator responses and never mutated once a
/// traversal has started rendering them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteObject {
    /// Store-wide identifier.
    pub id: ObjectId,

    /// Display name (not full path).
    pub name: CompactString,

    /// File or folder.
    #[serde(default)]
    pub kind: ObjectKind,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// Bytes counted against the owner's quota.
    #[serde(default)]
    pub quota_bytes_used: u64,

    /// Monotonic version number maintained by the store.
    #[serde(default)]
    pub version: i64,

    #[serde(default)]
    pub mime_type: String,

    /// Entity tag of the current revision.
    #[serde(default)]
    pub etag: String,

    /// Hex content hash, empty when the store has none.
    #[serde(default)]
    pub checksum: String,

    /// Last modification time.
    #[serde(default = "epoch")]
    pub modified: DateTime<Utc>,

    /// Last time the requesting user viewed the object.
    #[serde(default)]
    pub last_viewed: Option<DateTime<Utc>>,

    #[serde(default)]
    pub shared: bool,

    /// Owner display names, in store order.
    #[serde(default)]
    pub owners: Vec<String>,

    #[serde(default)]
    pub last_modifying_user: String,

    #[serde(default)]
    pub description: String,

    /// Name the object was originally uploaded with.
    #[serde(default)]
    pub original_name: Option<CompactString>,

    /// Whether readers may copy the file. Ignored for folders.
    #[serde(default)]
    pub copyable: bool,

    #[serde(default)]
    pub labels: Option<Labels>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl RemoteObject {
    /// Create a new file object.
    pub fn new_file(
        id: impl Into<ObjectId>,
        name: impl Into<CompactString>,
        size: u64,
        checksum: impl Into<String>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            size,
            quota_bytes_used: size,
            checksum: checksum.into(),
            copyable: true,
            ..Self::blank(id.into(), name.into(), ObjectKind::File, modified)
        }
    }

    /// Create a new folder object.
    pub fn new_folder(
        id: impl Into<ObjectId>,
        name: impl Into<CompactString>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            mime_type: FOLDER_MIME_TYPE.to_string(),
            ..Self::blank(id.into(), name.into(), ObjectKind::Folder, modified)
        }
    }

    fn blank(id: ObjectId, name: CompactString, kind: ObjectKind, modified: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            kind,
            size: 0,
            quota_bytes_used: 0,
            version: 1,
            mime_type: String::new(),
            etag: String::new(),
            checksum: String::new(),
            modified,
            last_viewed: None,
            shared: false,
            owners: Vec::new(),
            last_modifying_user: String::new(),
            description: String::new(),
            original_name: None,
            copyable: false,
            labels: None,
        }
    }

    /// Check if this object is a folder.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// The checksum to report, if any.
    ///
    /// Folders never report one, even when the store hands back a value.
    pub fn reported_checksum(&self) -> Option<&str> {
        if self.is_container() || self.checksum.is_empty() {
            None
        } else {
            Some(self.checksum.as_str())
        }
    }

    /// Checksum used as the primary sort key, empty for folders.
    pub fn sort_checksum(&self) -> &str {
        self.reported_checksum().unwrap_or("")
    }

    /// Original name, when it differs from the current display name.
    ///
    /// A missing original name counts as empty, so it differs from any
    /// non-empty name.
    pub fn renamed_from(&self) -> Option<&str> {
        let original = self.original_name.as_deref().unwrap_or("");
        (original != self.name.as_str()).then_some(original)
    }

    /// Whether the object is considered hidden in listings.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    pub fn with_owners<I, S>(mut self, owners: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.owners = owners.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_original_name(mut self, original: impl Into<CompactString>) -> Self {
        self.original_name = Some(original.into());
        self
    }
}

/// MIME type the store uses for folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// Access level granted by a permission.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Role {
    Owner,
    Organizer,
    FileOrganizer,
    Writer,
    Commenter,
    Reader,
}

/// Kind of grantee a permission applies to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AccountType {
    User,
    Group,
    Domain,
    Anyone,
}

/// One access-control entry of an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// Display name of the grantee.
    #[serde(default)]
    pub name: String,
    /// Contact address of the grantee, empty for `anyone`.
    #[serde(default)]
    pub email: String,
    pub role: Role,
    pub account_type: AccountType,
}

impl PermissionEntry {
    /// Create a new permission entry.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        account_type: AccountType,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            account_type,
        }
    }
}
