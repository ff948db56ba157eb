//! Integration tests for reconfiguring whole nodes

use super::test_utils::{NodeFixture, AGENT_JSON, HTTP_JSON, SERVER_CFG};
use replconf::descriptor::{DescriptorLoader, NodeConfig};
use replconf::error::{PatchError, ReconfigError};
use replconf::reconfigure::{FileRole, Reconfigurator};
use std::fs;

fn node_for(fixture: &NodeFixture) -> NodeConfig {
    NodeConfig {
        base_directory: fixture.base_str(),
        ..NodeConfig::default()
    }
}

#[test]
fn test_replication_manager_node_defaults() {
    let fixture = NodeFixture::with_replication_manager();
    let node = node_for(&fixture);

    let report = Reconfigurator::new().run(&[node]).unwrap();
    assert_eq!(report.nodes.len(), 1);
    let roles: Vec<_> = report.nodes[0].files.iter().map(|f| f.role).collect();
    assert_eq!(
        roles,
        vec![
            FileRole::Server,
            FileRole::Http,
            FileRole::Agent,
            FileRole::ReplicationManager
        ]
    );

    assert_eq!(
        fixture.read("ctsrvr.cfg"),
        "; FairCom server configuration\n\
         SERVER_NAME\tMEMPHIS\n\
         SERVER_PORT\t19991\n\
         READONLY_SERVER\tNO\n\
         SQL_PORT\t19991\n\
         PLUGIN cthttpd;./web/cthttpd.dll\n\
         ;PLUGIN ctagent;./agent/ctagent.dll"
    );

    assert_eq!(
        fixture.read("cthttpd.json"),
        "{\n  \"listening_http_port\":\t19993,\n  \
         \"listening_https_port\":\t19992,\n  \
         \"mqtt_listening_port\": 1883,\n  \
         \"mqtt_websocket_port\": 8083,\n  \
         \"ssl_certificate\": \"./web/fccert.pem\"\n}"
    );

    assert_eq!(
        fixture.read("ctagent.json"),
        "{\n  \"memphis_server_name\":\t\"MEMPHIS\",\n  \
         \"memphis_sql_port\":\t19991,\n  \
         \"memphis_host\":\t\"127.0.0.1\",\n  \
         \"memphis_database\":\t\"MEMPHIS\",\n  \
         \"log_level\": \"info\"\n}"
    );

    assert_eq!(
        fixture.read("ctReplicationManager.cfg"),
        "; MEMPHIS_SQL_PORT must match the agent setting\n\
         MEMPHIS_SQL_PORT\t19991\n\
         MEMPHIS_HOST localhost"
    );
}

#[test]
fn test_second_run_finishes_uncommenting() {
    let fixture = NodeFixture::new();
    let mut node = node_for(&fixture);
    node.replication_manager_file_name = Some(String::new());

    Reconfigurator::new().run(std::slice::from_ref(&node)).unwrap();
    let second = Reconfigurator::new().run(&[node]).unwrap();

    let server = fixture.read("ctsrvr.cfg");
    assert!(server.ends_with("\nPLUGIN ctagent;./agent/ctagent.dll"));
    // Only the agent plugin line changed on the second pass.
    assert_eq!(second.nodes[0].lines_changed(), 1);
}

#[test]
fn test_data_node_from_descriptor() {
    let fixture = NodeFixture::new();
    let json = format!(
        r#"[{{
            "baseDirectory": {base:?},
            "serverName": "NODE1",
            "serverPort": "5597",
            "readOnlyServer": "YES",
            "sqlPort": "6597",
            "listeningHttpPort": 8081,
            "listeningHttpsPort": 8444,
            "mqttListeningPort": 11883,
            "mqttWebsocketPort": 18083,
            "memphisServerName": "MEMPHIS",
            "memphisSqlPort": 19991,
            "memphisHost": "10.1.2.3",
            "memphisDatabase": "MEMPHIS",
            "replicationManagerFileName": ""
        }}]"#,
        base = fixture.base_str()
    );
    let nodes = DescriptorLoader::parse(&json).unwrap();

    let report = Reconfigurator::new().run(&nodes).unwrap();
    assert_eq!(report.nodes[0].files.len(), 3);

    let server = fixture.read("ctsrvr.cfg");
    assert!(server.contains("\nSERVER_NAME\tNODE1\n"));
    assert!(server.contains("\nREADONLY_SERVER\tYES\n"));

    let http = fixture.read("cthttpd.json");
    assert!(http.contains("  \"mqtt_listening_port\":\t11883,\n"));
    assert!(http.contains("  \"mqtt_websocket_port\":\t18083,\n"));

    let agent = fixture.read("ctagent.json");
    assert!(agent.contains("  \"memphis_host\":\t\"10.1.2.3\",\n"));
    assert!(agent.contains("  \"memphis_server_name\":\t\"MEMPHIS\",\n"));
}

#[test]
fn test_missing_file_aborts_run() {
    let first = NodeFixture::new();
    fs::remove_file(first.config_file("ctagent.json")).unwrap();
    let second = NodeFixture::new();

    let mut nodes = vec![node_for(&first), node_for(&second)];
    for node in nodes.iter_mut() {
        node.replication_manager_file_name = Some(String::new());
    }

    let err = Reconfigurator::new().run(&nodes).unwrap_err();
    match err {
        ReconfigError::FileUpdate { role, source, .. } => {
            assert_eq!(role, "agent");
            assert!(matches!(source, PatchError::FileNotFound(_)));
        }
        other => panic!("expected file update error, got {:?}", other),
    }

    // Files patched before the failure stay patched; later nodes are untouched.
    assert_ne!(first.read("ctsrvr.cfg"), SERVER_CFG);
    assert_eq!(second.read("ctsrvr.cfg"), SERVER_CFG);
    assert_eq!(second.read("cthttpd.json"), HTTP_JSON);
}

#[test]
fn test_missing_replication_manager_file_is_fatal() {
    let fixture = NodeFixture::new();
    let node = node_for(&fixture);

    let err = Reconfigurator::new().run(&[node]).unwrap_err();
    assert!(matches!(
        err,
        ReconfigError::FileUpdate {
            role: "replication manager",
            ..
        }
    ));
}

#[test]
fn test_dry_run_writes_nothing() {
    let fixture = NodeFixture::with_replication_manager();
    let node = node_for(&fixture);

    let report = Reconfigurator::new()
        .with_dry_run(true)
        .run(&[node])
        .unwrap();
    assert!(report.dry_run);
    assert!(report.nodes[0].lines_changed() > 0);
    assert!(report.nodes[0].files.iter().all(|f| !f.update.written));

    assert_eq!(fixture.read("ctsrvr.cfg"), SERVER_CFG);
    assert_eq!(fixture.read("ctagent.json"), AGENT_JSON);
}
