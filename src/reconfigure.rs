//! Node reconfiguration
//!
//! Builds the substitution maps for each node's server, HTTP, agent and
//! replication manager files and patches them in a fixed order. The first
//! file that cannot be updated aborts the whole run.

use crate::descriptor::NodeConfig;
use crate::error::{PatchError, ReconfigError};
use crate::patch::{
    clear_comment, update_config, ClearReport, MatchMode, SubstitutionMap, UpdateOptions,
    UpdateReport,
};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Which of a node's config files is being patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileRole {
    Server,
    Http,
    Agent,
    ReplicationManager,
}

impl FileRole {
    pub fn as_str(self) -> &'static str {
        match self {
            FileRole::Server => "server",
            FileRole::Http => "http",
            FileRole::Agent => "agent",
            FileRole::ReplicationManager => "replication manager",
        }
    }

    /// Replication manager files are matched strictly so comments stay comments.
    pub fn match_mode(self) -> MatchMode {
        match self {
            FileRole::ReplicationManager => MatchMode::StartsWith,
            _ => MatchMode::Contains,
        }
    }
}

/// Patch result for one file of a node.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub role: FileRole,
    #[serde(flatten)]
    pub update: UpdateReport,
}

/// Everything done for one node.
#[derive(Debug, Clone, Serialize)]
pub struct NodeReport {
    pub node: String,
    pub files: Vec<FileReport>,
    pub cleared: Vec<ClearReport>,
}

impl NodeReport {
    pub fn lines_changed(&self) -> usize {
        self.files.iter().map(|f| f.update.lines_changed()).sum::<usize>()
            + self.cleared.iter().map(|c| c.lines_uncommented).sum::<usize>()
    }
}

/// Summary of a complete run over all nodes.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub dry_run: bool,
    pub nodes: Vec<NodeReport>,
}

pub fn server_substitutions(node: &NodeConfig) -> SubstitutionMap {
    let mut map = SubstitutionMap::new();
    map.insert("SERVER_NAME", node.server_name.as_str())
        .insert("SERVER_PORT", node.server_port.as_str())
        .insert("READONLY_SERVER", node.read_only_server.as_str())
        .insert("SQL_PORT", node.sql_port.as_str());
    map
}

/// MQTT ports are only written when configured.
pub fn http_substitutions(node: &NodeConfig) -> SubstitutionMap {
    let mut map = SubstitutionMap::new();
    map.insert("\"listening_http_port\":", node.listening_http_port)
        .insert("\"listening_https_port\":", node.listening_https_port);
    if let Some(port) = node.mqtt_listening_port {
        map.insert("\"mqtt_listening_port\":", port);
    }
    if let Some(port) = node.mqtt_websocket_port {
        map.insert("\"mqtt_websocket_port\":", port);
    }
    map
}

pub fn agent_substitutions(node: &NodeConfig) -> SubstitutionMap {
    let mut map = SubstitutionMap::new();
    map.insert("\"memphis_server_name\":", node.memphis_server_name.as_str());
    if let Some(port) = node.memphis_sql_port {
        map.insert("\"memphis_sql_port\":", port);
    }
    map.insert("\"memphis_host\":", node.memphis_host.as_str())
        .insert("\"memphis_database\":", node.memphis_database.as_str());
    map
}

/// Reuses the agent's memphis SQL port; both files must agree.
pub fn replication_manager_substitutions(node: &NodeConfig) -> Option<SubstitutionMap> {
    node.replication_manager_file()?;
    let port = node.memphis_sql_port?;
    let mut map = SubstitutionMap::new();
    map.insert("MEMPHIS_SQL_PORT", port);
    Some(map)
}

/// Applies node records to their config files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconfigurator {
    dry_run: bool,
}

impl Reconfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reconfigure every node in order, stopping at the first failure.
    pub fn run(&self, nodes: &[NodeConfig]) -> Result<RunReport, ReconfigError> {
        let mut reports = Vec::with_capacity(nodes.len());
        for node in nodes {
            reports.push(self.reconfigure_node(node)?);
        }
        Ok(RunReport {
            dry_run: self.dry_run,
            nodes: reports,
        })
    }

    pub fn reconfigure_node(&self, node: &NodeConfig) -> Result<NodeReport, ReconfigError> {
        let label = node.label();
        info!(node = %label, dry_run = self.dry_run, "Reconfiguring node");

        let mut report = NodeReport {
            node: label,
            files: Vec::new(),
            cleared: Vec::new(),
        };

        let server_path = node.server_path();
        let server = self.patch(
            &report.node,
            FileRole::Server,
            &server_path,
            &server_substitutions(node),
        )?;
        report.files.push(server);

        // Plugin lines must be active for the HTTP and agent settings to matter.
        for marker in [node.http_plugin_marker(), node.agent_plugin_marker()] {
            let cleared = clear_comment(&server_path, marker, self.dry_run)
                .map_err(|source| file_error(&report.node, FileRole::Server, source))?;
            report.cleared.push(cleared);
        }

        let http = self.patch(
            &report.node,
            FileRole::Http,
            &node.http_path(),
            &http_substitutions(node),
        )?;
        report.files.push(http);

        let agent = self.patch(
            &report.node,
            FileRole::Agent,
            &node.agent_path(),
            &agent_substitutions(node),
        )?;
        report.files.push(agent);

        if let (Some(path), Some(subs)) = (
            node.replication_manager_path(),
            replication_manager_substitutions(node),
        ) {
            let rm = self.patch(&report.node, FileRole::ReplicationManager, &path, &subs)?;
            report.files.push(rm);
        }

        Ok(report)
    }

    fn patch(
        &self,
        node: &str,
        role: FileRole,
        path: &Path,
        subs: &SubstitutionMap,
    ) -> Result<FileReport, ReconfigError> {
        info!(path = %path.display(), role = role.as_str(), "Updating");
        let options = UpdateOptions::new(role.match_mode()).dry_run(self.dry_run);
        let update = update_config(path, subs, options)
            .map_err(|source| file_error(node, role, source))?;
        Ok(FileReport { role, update })
    }
}

fn file_error(node: &str, role: FileRole, source: PatchError) -> ReconfigError {
    ReconfigError::FileUpdate {
        node: node.to_string(),
        role: role.as_str(),
        source,
    }
}
