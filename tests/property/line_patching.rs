//! Property-based tests for line patching and the line store

use proptest::prelude::*;
use replconf::patch::{fix_line, FileKind, LineSequence, MatchMode, SubstitutionMap};

fn server_map() -> SubstitutionMap {
    let mut map = SubstitutionMap::new();
    map.insert("SERVER_NAME", "MEMPHIS")
        .insert("SERVER_PORT", "19991")
        .insert("READONLY_SERVER", "NO")
        .insert("SQL_PORT", "19991");
    map
}

proptest! {
    /// Lines without any key come back unchanged in both modes.
    #[test]
    fn test_unmatched_lines_identity(line in "[a-z0-9 ;=./\t]{0,40}") {
        let map = server_map();
        prop_assert_eq!(fix_line(&line, &map, FileKind::Plain, MatchMode::Contains), line.clone());
        prop_assert_eq!(fix_line(&line, &map, FileKind::Json, MatchMode::StartsWith), line);
    }

    /// Whitespace indentation is kept and the line becomes `key<TAB>value`.
    #[test]
    fn test_indented_key_rewritten(indent in "[ \t]{0,8}", tail in "[ a-z0-9]{0,12}") {
        let map = server_map();
        let line = format!("{}SERVER_NAME{}", indent, tail);
        let out = fix_line(&line, &map, FileKind::Plain, MatchMode::Contains);
        prop_assert_eq!(out, format!("{}SERVER_NAME\tMEMPHIS", indent));
    }

    /// A commented key line is reactivated once, then stays stable.
    #[test]
    fn test_rewrite_idempotent(indent in "[ \t]{0,4}", old in "[0-9]{1,5}") {
        let map = server_map();
        let line = format!("{};SQL_PORT {}", indent, old);
        let once = fix_line(&line, &map, FileKind::Plain, MatchMode::Contains);
        let twice = fix_line(&once, &map, FileKind::Plain, MatchMode::Contains);
        prop_assert_eq!(&once, &format!("{}SQL_PORT\t19991", indent));
        prop_assert_eq!(once, twice);
    }

    /// Rendering then parsing yields the same lines in the same order.
    #[test]
    fn test_line_sequence_round_trip(
        lines in proptest::collection::vec("[^\r\n]{0,20}", 1..20),
        trailing in any::<bool>(),
    ) {
        // An empty last line is only representable with a trailing newline.
        prop_assume!(trailing || lines.last().map_or(false, |l| !l.is_empty()));
        let seq = LineSequence { lines, trailing_newline: trailing };
        let reparsed = LineSequence::parse(&seq.render());
        prop_assert_eq!(reparsed, seq);
    }
}
