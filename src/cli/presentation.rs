//! Presentation: run summary formatters (text table or JSON).

use crate::error::ReconfigError;
use crate::reconfigure::RunReport;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

/// Format a run summary in the requested format ("json" or anything else for text).
pub fn format_run_report(report: &RunReport, format: &str) -> Result<String, ReconfigError> {
    if format == "json" {
        format_run_report_json(report)
    } else {
        Ok(format_run_report_text(report))
    }
}

pub fn format_run_report_json(report: &RunReport) -> Result<String, ReconfigError> {
    serde_json::to_string_pretty(report).map_err(|e| ReconfigError::ConfigError(e.to_string()))
}

pub fn format_run_report_text(report: &RunReport) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Node", "File", "Role", "Matched", "Changed"]);

    for node in &report.nodes {
        for file in &node.files {
            table.add_row(vec![
                node.node.clone(),
                file.update.path.display().to_string(),
                file.role.as_str().to_string(),
                file.update.lines_matched.to_string(),
                file.update.lines_changed().to_string(),
            ]);
        }
        for cleared in &node.cleared {
            let role = format!("uncomment {}", cleared.marker);
            let changed = if cleared.skipped {
                "-".to_string()
            } else {
                cleared.lines_uncommented.to_string()
            };
            table.add_row(vec![
                node.node.clone(),
                cleared.path.display().to_string(),
                role,
                "-".to_string(),
                changed,
            ]);
        }
    }

    let total: usize = report.nodes.iter().map(|n| n.lines_changed()).sum();
    let heading = if report.dry_run {
        format!(
            "Dry run: {} node(s), {} line(s) would change",
            report.nodes.len(),
            total
        )
    } else {
        format!(
            "Updated {} node(s), {} line(s) changed",
            report.nodes.len(),
            total
        )
    };
    format!("{}\n{}", heading, table)
}
