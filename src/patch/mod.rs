//! Line-oriented config patching
//!
//! Rewrites target configuration files one line at a time: a substitution map
//! decides which lines are replaced, plugin-loading lines can be uncommented,
//! and values written into JSON-like files are quoted heuristically.

pub mod comment;
pub mod line;
pub mod quote;
pub mod store;
pub mod substitution;
pub mod updater;

pub use comment::{clear_comment, clear_comment_line, ClearReport};
pub use line::{fix_line, FileKind, MatchMode};
pub use quote::quote_if_needed;
pub use store::LineSequence;
pub use substitution::{SubstitutionMap, SubstitutionValue};
pub use updater::{update_config, LineChange, UpdateOptions, UpdateReport};
