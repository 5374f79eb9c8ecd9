use chrono::{TimeZone, Utc};
use drivestat_core::{
    AccountType, DepthBudget, ErrorAggregator, Labels, ObjectId, ObjectKind, PermissionEntry,
    RemoteError, RemoteObject, ReportMode, ReportOptions, Role, StatError, StatusCode, path,
};

fn mtime() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 3, 14, 9, 26, 53).unwrap()
}

#[test]
fn test_object_id_operations() {
    let id1 = ObjectId::new("0B1a2b3c");
    let id2 = ObjectId::from("0B1a2b3c".to_string());

    assert_eq!(id1, id2);
    assert_eq!(id1.as_str(), "0B1a2b3c");
    assert_eq!(format!("{id1}"), "0B1a2b3c");
}

#[test]
fn test_file_object_creation_and_properties() {
    let file = RemoteObject::new_file("f1", "report.pdf", 2048, "9e107d9d372bb6826bd81d3542a419d6", mtime())
        .with_owners(["Ada Lovelace", "Charles Babbage"])
        .with_description("quarterly numbers");

    assert!(!file.is_container());
    assert_eq!(file.kind, ObjectKind::File);
    assert_eq!(file.name.as_str(), "report.pdf");
    assert_eq!(file.size, 2048);
    assert_eq!(file.quota_bytes_used, 2048);
    assert!(file.copyable);
    assert_eq!(file.owners.len(), 2);
    assert_eq!(
        file.reported_checksum(),
        Some("9e107d9d372bb6826bd81d3542a419d6")
    );
    assert!(file.labels.is_none());
}

#[test]
fn test_folder_object_creation_and_properties() {
    let folder = RemoteObject::new_folder("d1", "Projects", mtime()).with_labels(Labels {
        starred: true,
        ..Labels::default()
    });

    assert!(folder.is_container());
    assert_eq!(folder.size, 0);
    assert!(!folder.copyable);
    assert_eq!(folder.reported_checksum(), None);
    assert_eq!(folder.mime_type, drivestat_core::FOLDER_MIME_TYPE);
    assert!(folder.labels.unwrap().starred);
}

#[test]
fn test_hidden_objects() {
    let hidden = RemoteObject::new_file("h", ".secret", 1, "", mtime());
    let visible = RemoteObject::new_file("v", "public", 1, "", mtime());

    assert!(hidden.is_hidden());
    assert!(!visible.is_hidden());
}

#[test]
fn test_object_deserialize_with_defaults() {
    let json = r#"{
        "id": "abc",
        "name": "notes.txt",
        "kind": "file",
        "checksum": "d41d8cd98f00b204e9800998ecf8427e",
        "modified": "2015-03-14T09:26:53Z"
    }"#;

    let object: RemoteObject = serde_json::from_str(json).unwrap();
    assert_eq!(object.id, ObjectId::new("abc"));
    assert_eq!(object.modified, mtime());
    assert_eq!(object.size, 0);
    assert!(object.last_viewed.is_none());
    assert!(object.original_name.is_none());
    assert!(object.owners.is_empty());
}

#[test]
fn test_permission_entry_serde() {
    let entry = PermissionEntry::new("Ada", "ada@example.com", Role::FileOrganizer, AccountType::User);
    let json = serde_json::to_string(&entry).unwrap();
    assert!(json.contains("\"fileOrganizer\""));
    assert!(json.contains("\"user\""));

    let back: PermissionEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn test_report_options_defaults() {
    let options = ReportOptions::default();
    assert_eq!(options.mode(), ReportMode::Verbose);
    assert_eq!(options.depth, DepthBudget::Finite(0));
    assert!(options.color);

    let csv = ReportOptions::builder().csv(true).build().unwrap();
    assert_eq!(csv.mode(), ReportMode::Csv);
}

#[test]
fn test_report_options_serde_depth() {
    let options: ReportOptions = serde_json::from_str(r#"{"depth": -1, "csv": true}"#).unwrap();
    assert_eq!(options.depth, DepthBudget::Unlimited);
    assert!(options.csv);
    assert!(options.color);

    let json = serde_json::to_string(&ReportOptions::default()).unwrap();
    assert!(json.contains("\"depth\":0"));
}

#[test]
fn test_aggregator_keeps_every_message() {
    let mut agg = ErrorAggregator::new();
    assert!(agg.is_empty());

    agg.record("stat", "bad1", &StatError::from(RemoteError::not_found("bad1")));
    agg.record(
        "stat",
        "bad2",
        &StatError::from(RemoteError::PermissionDenied {
            what: "bad2".to_string(),
        }),
    );

    let err = agg.finish().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bad1"));
    assert!(message.contains("bad2"));
    assert_eq!(message.lines().count(), 2);
    assert_eq!(err.status(), StatusCode::PermissionDenied);
    assert_eq!(err.status().exit_code(), 4);
}

#[test]
fn test_path_helpers_compose() {
    let child = path::join("/a", "b");
    assert_eq!(child, "/a/b");
    assert_eq!(path::strip_root(&child), "a/b");
    assert_eq!(path::join(&child, "../c"), "/a/c");
}
