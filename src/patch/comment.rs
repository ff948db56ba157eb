//! Comment clearer: uncomment plugin-loading lines in the server file.

use crate::error::PatchError;
use crate::patch::line::COMMENT_CHAR;
use crate::patch::store::LineSequence;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of one clear pass over a file.
#[derive(Debug, Clone, Serialize)]
pub struct ClearReport {
    pub path: PathBuf,
    pub marker: String,
    pub lines_uncommented: usize,
    /// Set when the file did not exist and the pass was a no-op.
    pub skipped: bool,
}

/// Remove one `;` from `line` if it contains `marker` and is comment-prefixed.
///
/// Only the first `;` is removed, so `;;PLUGIN x` becomes `;PLUGIN x`. A
/// semicolon after other text (`PLUGIN cthttpd;./web/cthttpd.dll`) is left alone.
pub fn clear_comment_line(line: &str, marker: &str) -> Option<String> {
    if !line.contains(marker) || !line.trim().starts_with(COMMENT_CHAR) {
        return None;
    }
    Some(line.replacen(COMMENT_CHAR, "", 1))
}

/// Uncomment every line of `path` that carries `marker`.
///
/// A missing file is logged and reported as skipped. When `dry_run` is set
/// the file is left untouched.
pub fn clear_comment(path: &Path, marker: &str, dry_run: bool) -> Result<ClearReport, PatchError> {
    debug!(path = %path.display(), marker, "clear_comment");

    let mut report = ClearReport {
        path: path.to_path_buf(),
        marker: marker.to_string(),
        lines_uncommented: 0,
        skipped: false,
    };

    if !path.is_file() {
        info!(path = %path.display(), "Unable to find the configuration file");
        report.skipped = true;
        return Ok(report);
    }

    let mut seq = LineSequence::load(path)?;
    for line in seq.lines.iter_mut() {
        if let Some(cleared) = clear_comment_line(line, marker) {
            info!(line = %cleared, "Uncommenting line");
            *line = cleared;
            report.lines_uncommented += 1;
        }
    }

    if !dry_run {
        seq.save(path)?;
    }
    Ok(report)
}
