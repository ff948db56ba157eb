//! Replconf: node configuration patcher
//!
//! Patches a node's server, HTTP daemon, agent and replication manager config
//! files so their settings match the values in a central JSON descriptor.

pub mod cli;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod patch;
pub mod reconfigure;
