//! Node descriptor
//!
//! The descriptor is a JSON file holding one record per node (or a single
//! record object). Each record names the node's directory, the config files to
//! patch and the values to write into them. Missing fields fall back to the
//! settings of a typical Replication Manager node.

use crate::error::DescriptorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default marker identifying the HTTP plugin line in the server file.
pub const DEFAULT_HTTP_PLUGIN: &str = "cthttpd.";
/// Default marker identifying the agent plugin line in the server file.
pub const DEFAULT_AGENT_PLUGIN: &str = "ctagent.";
pub const DEFAULT_REPLICATION_MANAGER_FILE: &str = "ctReplicationManager.cfg";

/// Configuration for one node
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    /// Directory where this node is installed
    #[serde(default)]
    pub base_directory: String,

    /// Config directory, relative to the base directory
    #[serde(default = "default_config_directory")]
    pub config_directory: String,

    #[serde(default = "default_server_file_name")]
    pub server_file_name: String,

    /// `SERVER_NAME` in the server file
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// `SERVER_PORT` in the server file
    #[serde(default = "default_port_string")]
    pub server_port: String,

    /// `READONLY_SERVER` in the server file (YES or NO)
    #[serde(default = "default_read_only_server")]
    pub read_only_server: String,

    /// `SQL_PORT` in the server file
    #[serde(default = "default_port_string")]
    pub sql_port: String,

    /// Marker for the HTTP plugin line. Library names are OS specific.
    #[serde(default)]
    pub http_plugin: String,

    /// Marker for the agent plugin line. Library names are OS specific.
    #[serde(default)]
    pub agent_plugin: String,

    #[serde(default = "default_http_file_name")]
    pub http_file_name: String,

    #[serde(default = "default_listening_http_port")]
    pub listening_http_port: u16,

    #[serde(default = "default_listening_https_port")]
    pub listening_https_port: u16,

    /// Absent on Replication Manager nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_listening_port: Option<u16>,

    /// Absent on Replication Manager nodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt_websocket_port: Option<u16>,

    #[serde(default = "default_agent_file_name")]
    pub agent_file_name: String,

    #[serde(default = "default_memphis_name")]
    pub memphis_server_name: String,

    /// Also written to `MEMPHIS_SQL_PORT` in the replication manager file
    #[serde(default = "default_memphis_sql_port")]
    pub memphis_sql_port: Option<u16>,

    #[serde(default = "default_memphis_host")]
    pub memphis_host: String,

    #[serde(default = "default_memphis_name")]
    pub memphis_database: String,

    /// Empty means this node has no replication manager file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_manager_file_name: Option<String>,

    /// Legacy name of `replicationManagerFileName`
    #[serde(default, skip_serializing)]
    pub memphis_file_name: Option<String>,
}

fn default_config_directory() -> String {
    "config".to_string()
}

fn default_server_file_name() -> String {
    "ctsrvr.cfg".to_string()
}

fn default_server_name() -> String {
    "MEMPHIS".to_string()
}

fn default_port_string() -> String {
    "19991".to_string()
}

fn default_read_only_server() -> String {
    "NO".to_string()
}

fn default_http_file_name() -> String {
    "cthttpd.json".to_string()
}

fn default_listening_http_port() -> u16 {
    19993
}

fn default_listening_https_port() -> u16 {
    19992
}

fn default_agent_file_name() -> String {
    "ctagent.json".to_string()
}

fn default_memphis_name() -> String {
    "\"MEMPHIS\"".to_string()
}

fn default_memphis_sql_port() -> Option<u16> {
    Some(19991)
}

fn default_memphis_host() -> String {
    "\"127.0.0.1\"".to_string()
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            base_directory: String::new(),
            config_directory: default_config_directory(),
            server_file_name: default_server_file_name(),
            server_name: default_server_name(),
            server_port: default_port_string(),
            read_only_server: default_read_only_server(),
            sql_port: default_port_string(),
            http_plugin: String::new(),
            agent_plugin: String::new(),
            http_file_name: default_http_file_name(),
            listening_http_port: default_listening_http_port(),
            listening_https_port: default_listening_https_port(),
            mqtt_listening_port: None,
            mqtt_websocket_port: None,
            agent_file_name: default_agent_file_name(),
            memphis_server_name: default_memphis_name(),
            memphis_sql_port: default_memphis_sql_port(),
            memphis_host: default_memphis_host(),
            memphis_database: default_memphis_name(),
            replication_manager_file_name: None,
            memphis_file_name: None,
        }
    }
}

/// Descriptor validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Node(usize, String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Node(index, msg) => write!(f, "Node {}: {}", index, msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl NodeConfig {
    /// Directory holding this node's config files.
    pub fn config_dir(&self) -> PathBuf {
        Path::new(&self.base_directory).join(&self.config_directory)
    }

    pub fn server_path(&self) -> PathBuf {
        self.config_dir().join(&self.server_file_name)
    }

    pub fn http_path(&self) -> PathBuf {
        self.config_dir().join(&self.http_file_name)
    }

    pub fn agent_path(&self) -> PathBuf {
        self.config_dir().join(&self.agent_file_name)
    }

    /// Resolved replication manager file name.
    ///
    /// Precedence: a non-empty `replicationManagerFileName`, then a non-empty
    /// legacy `memphisFileName`, then an explicitly empty
    /// `replicationManagerFileName` (no file), then the default.
    pub fn replication_manager_file(&self) -> Option<&str> {
        let current = self.replication_manager_file_name.as_deref();
        let legacy = self.memphis_file_name.as_deref();
        match (current, legacy) {
            (Some(name), _) if !name.is_empty() => Some(name),
            (_, Some(name)) if !name.is_empty() => Some(name),
            (Some(_), _) => None,
            (None, _) => Some(DEFAULT_REPLICATION_MANAGER_FILE),
        }
    }

    pub fn replication_manager_path(&self) -> Option<PathBuf> {
        self.replication_manager_file()
            .map(|name| self.config_dir().join(name))
    }

    pub fn http_plugin_marker(&self) -> &str {
        non_empty_or(&self.http_plugin, DEFAULT_HTTP_PLUGIN)
    }

    pub fn agent_plugin_marker(&self) -> &str {
        non_empty_or(&self.agent_plugin, DEFAULT_AGENT_PLUGIN)
    }

    /// Short human-readable name for logs.
    pub fn label(&self) -> String {
        if self.base_directory.is_empty() {
            self.server_name.clone()
        } else {
            format!("{} ({})", self.server_name, self.base_directory)
        }
    }

    /// Structural checks only; values are written as given. Every problem
    /// with the record is reported, not just the first.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let required = [
            ("serverFileName", &self.server_file_name),
            ("httpFileName", &self.http_file_name),
            ("agentFileName", &self.agent_file_name),
            ("serverName", &self.server_name),
            ("serverPort", &self.server_port),
            ("readOnlyServer", &self.read_only_server),
            ("sqlPort", &self.sql_port),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.push(format!("{} cannot be empty", field));
            }
        }

        if self.replication_manager_file().is_some() && self.memphis_sql_port.is_none() {
            errors.push(
                "memphisSqlPort is required when a replication manager file is configured"
                    .to_string(),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Loads node records from a descriptor file.
pub struct DescriptorLoader;

impl DescriptorLoader {
    /// Load and validate every node record in `path`.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<NodeConfig>, DescriptorError> {
        let path = path.as_ref();
        if !path.exists() || path.is_dir() {
            return Err(DescriptorError::Missing(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|source| DescriptorError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let nodes = Self::parse(&contents).map_err(|source| DescriptorError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        if nodes.is_empty() {
            return Err(DescriptorError::Empty(path.to_path_buf()));
        }
        debug!(path = %path.display(), nodes = nodes.len(), "Loaded descriptor");

        validate_all(&nodes).map_err(DescriptorError::Invalid)?;
        Ok(nodes)
    }

    /// Parse a JSON array of records or a single record object.
    pub fn parse(contents: &str) -> Result<Vec<NodeConfig>, serde_json::Error> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        if value.is_array() {
            serde_json::from_value(value)
        } else {
            serde_json::from_value(value).map(|node| vec![node])
        }
    }
}

/// Validate all records, collecting every error.
pub fn validate_all(nodes: &[NodeConfig]) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = nodes
        .iter()
        .enumerate()
        .flat_map(|(i, node)| {
            node.validate()
                .err()
                .unwrap_or_default()
                .into_iter()
                .map(move |e| ValidationError::Node(i, e))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
