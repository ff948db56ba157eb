//! CLI domain: parse, route, output, and presentation only.
//! No patching logic; the route dispatches to the reconfigurator.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{exit_code, map_error, ExitStatus};
pub use parse::Cli;
pub use presentation::{format_run_report, format_run_report_json, format_run_report_text};
pub use route::RunContext;
