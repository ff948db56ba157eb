//! Integration tests for descriptor loading

use replconf::descriptor::DescriptorLoader;
use replconf::error::DescriptorError;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_single_object_descriptor() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(
        &path,
        r#"{
            "baseDirectory": "/opt/faircom/memphis",
            "serverName": "MEMPHIS",
            "memphisFileName": "ctReplicationManager.cfg"
        }"#,
    )
    .unwrap();

    let nodes = DescriptorLoader::load_from_file(&path).unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(
        nodes[0].replication_manager_file(),
        Some("ctReplicationManager.cfg")
    );
}

#[test]
fn test_invalid_record_reports_index() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"[{}, {"serverFileName": ""}]"#).unwrap();

    match DescriptorLoader::load_from_file(&path).unwrap_err() {
        DescriptorError::Invalid(errors) => {
            assert_eq!(errors.len(), 1);
            assert!(errors[0].to_string().contains("Node 1"));
            assert!(errors[0].to_string().contains("serverFileName"));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_wrong_field_type_is_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.json");
    fs::write(&path, r#"[{"listeningHttpPort": "eighty"}]"#).unwrap();

    let err = DescriptorLoader::load_from_file(&path).unwrap_err();
    assert!(matches!(err, DescriptorError::Malformed { .. }));
}
