//! Line patcher: rewrite a single line according to a substitution map.

use crate::patch::quote::quote_if_needed;
use crate::patch::substitution::{SubstitutionMap, SubstitutionValue};
use serde::Serialize;
use std::path::Path;

/// Comment marker used by the plain key/value server files.
pub const COMMENT_CHAR: char = ';';

/// How a substitution key must appear in a line to trigger a rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Key may appear anywhere; a `;` before it is stripped, reactivating the line.
    Contains,
    /// Line must begin with the key; commented lines are never touched.
    StartsWith,
}

/// Target file format, derived from the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Plain,
    Json,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => FileKind::Json,
            _ => FileKind::Plain,
        }
    }

    /// Text appended to every rewritten line.
    pub fn suffix(self) -> &'static str {
        match self {
            FileKind::Json => ",",
            FileKind::Plain => "",
        }
    }
}

/// Return the rewritten line, or the original line if no rule applies.
pub fn fix_line(line: &str, subs: &SubstitutionMap, kind: FileKind, mode: MatchMode) -> String {
    rewrite_line(line, subs, kind, mode).unwrap_or_else(|| line.to_string())
}

/// Apply the first rule that triggers a rewrite. `None` means no key matched.
pub fn rewrite_line(
    line: &str,
    subs: &SubstitutionMap,
    kind: FileKind,
    mode: MatchMode,
) -> Option<String> {
    for (key, value) in subs.iter() {
        let Some(pos) = line.find(key) else {
            continue;
        };
        let indentation = match mode {
            MatchMode::Contains => strip_first_comment(&line[..pos]),
            MatchMode::StartsWith if pos == 0 => String::new(),
            MatchMode::StartsWith => continue,
        };
        let rendered = render_value(value, kind);
        return Some(format!(
            "{}{}\t{}{}",
            indentation,
            key,
            rendered,
            kind.suffix()
        ));
    }
    None
}

fn strip_first_comment(prefix: &str) -> String {
    match prefix.find(COMMENT_CHAR) {
        Some(i) => {
            let mut out = String::with_capacity(prefix.len());
            out.push_str(&prefix[..i]);
            out.push_str(&prefix[i + COMMENT_CHAR.len_utf8()..]);
            out
        }
        None => prefix.to_string(),
    }
}

fn render_value(value: &SubstitutionValue, kind: FileKind) -> String {
    match (value, kind) {
        (SubstitutionValue::Text(s), FileKind::Json) => quote_if_needed(s),
        _ => value.to_string(),
    }
}
