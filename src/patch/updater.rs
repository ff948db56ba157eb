//! Config updater: run the line patcher over one file and write it back.

use crate::error::PatchError;
use crate::patch::line::{rewrite_line, FileKind, MatchMode};
use crate::patch::store::LineSequence;
use crate::patch::substitution::SubstitutionMap;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Options for one update pass.
#[derive(Debug, Clone, Copy)]
pub struct UpdateOptions {
    pub mode: MatchMode,
    /// Compute the changes without writing the file.
    pub dry_run: bool,
}

impl UpdateOptions {
    pub fn new(mode: MatchMode) -> Self {
        Self {
            mode,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// A single rewritten line (1-based line number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineChange {
    pub line_number: usize,
    pub before: String,
    pub after: String,
}

/// Result of patching one file.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateReport {
    pub path: PathBuf,
    pub kind: FileKind,
    pub mode: MatchMode,
    pub lines_total: usize,
    /// Lines that matched a key, including ones already holding the target value.
    pub lines_matched: usize,
    pub changes: Vec<LineChange>,
    pub written: bool,
}

impl UpdateReport {
    pub fn lines_changed(&self) -> usize {
        self.changes.len()
    }
}

/// Patch `path` in place with `subs`.
///
/// Fails with [`PatchError::FileNotFound`] or [`PatchError::NotAFile`] when the
/// target is absent; callers treat that as fatal for the node. Keys that never
/// occur in the file are silently ignored.
pub fn update_config(
    path: &Path,
    subs: &SubstitutionMap,
    options: UpdateOptions,
) -> Result<UpdateReport, PatchError> {
    debug!(path = %path.display(), mode = ?options.mode, "update_config");

    subs.validate()?;

    if !path.exists() {
        return Err(PatchError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(PatchError::NotAFile(path.to_path_buf()));
    }

    let kind = FileKind::from_path(path);
    let mut seq = LineSequence::load(path)?;

    let mut report = UpdateReport {
        path: path.to_path_buf(),
        kind,
        mode: options.mode,
        lines_total: seq.len(),
        lines_matched: 0,
        changes: Vec::new(),
        written: false,
    };

    for (idx, line) in seq.lines.iter_mut().enumerate() {
        let Some(fixed) = rewrite_line(line, subs, kind, options.mode) else {
            continue;
        };
        report.lines_matched += 1;
        if fixed != *line {
            info!(line = %fixed, "Updating line");
            report.changes.push(LineChange {
                line_number: idx + 1,
                before: std::mem::replace(line, fixed),
                after: line.clone(),
            });
        }
    }

    if !options.dry_run {
        seq.save(path)?;
        report.written = true;
    }

    Ok(report)
}
