//! Integration tests for the node configuration patcher

mod descriptor_loading;
mod node_reconfigure;
