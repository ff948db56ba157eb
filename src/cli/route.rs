//! CLI route: run context built from the descriptor. Dispatches to the reconfigurator.

use crate::descriptor::{DescriptorLoader, NodeConfig};
use crate::error::ReconfigError;
use crate::reconfigure::{Reconfigurator, RunReport};
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: descriptor path and loaded node records.
pub struct RunContext {
    descriptor: PathBuf,
    nodes: Vec<NodeConfig>,
    dry_run: bool,
}

impl RunContext {
    /// Load and validate the descriptor.
    pub fn new(descriptor: PathBuf, dry_run: bool) -> Result<Self, ReconfigError> {
        let nodes = DescriptorLoader::load_from_file(&descriptor)?;
        info!(
            descriptor = %descriptor.display(),
            nodes = nodes.len(),
            "Descriptor loaded"
        );
        Ok(Self {
            descriptor,
            nodes,
            dry_run,
        })
    }

    /// Patch every node's files. Stops at the first file that cannot be updated.
    pub fn execute(&self) -> Result<RunReport, ReconfigError> {
        info!(
            descriptor = %self.descriptor.display(),
            dry_run = self.dry_run,
            "Applying descriptor"
        );
        Reconfigurator::new()
            .with_dry_run(self.dry_run)
            .run(&self.nodes)
    }
}
