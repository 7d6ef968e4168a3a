//! Source-range matching (§4.1): deciding whether the same text still
//! occupies a range across two versions of a file, tolerating edits outside
//! that range entirely.

use super::model::{Location, Position};

/// Byte offsets of the start of each line in `source` (line 1 starts at index 0).
fn line_start_offsets(source: &str) -> Vec<usize> {
    let mut offsets = vec![0usize];
    for (index, byte) in source.bytes().enumerate() {
        if byte == b'\n' {
            offsets.push(index + 1);
        }
    }
    offsets
}

/// Byte offset of `position` within `source`, given its precomputed line starts.
/// Returns `None` when `position` references a line beyond the source, or a
/// column beyond the end of the text (§4.1 edge policy).
fn byte_offset(source: &str, line_starts: &[usize], position: Position) -> Option<usize> {
    if position.line == 0 {
        return None;
    }
    let line_index = (position.line - 1) as usize;
    let line_start = *line_starts.get(line_index)?;
    let offset = line_start.checked_add(position.column as usize)?;
    if offset > source.len() {
        return None;
    }
    Some(offset)
}

/// The end-of-file position of `source`: the last line, at the column just
/// past its final byte.
pub fn end_of_file(source: &str) -> Position {
    let line_starts = line_start_offsets(source);
    let last_line_start = *line_starts
        .last()
        .expect("line_start_offsets always returns at least one entry");
    Position::new(line_starts.len() as u32, (source.len() - last_line_start) as u32)
}

/// Close an open-ended range starting at `start`: the next strictly-greater
/// position among `sibling_starts` (the start positions of neighboring
/// definitions in the same file), or end-of-file when there is none (§4.1).
pub fn close_open_range(start: Position, sibling_starts: &[Position], source: &str) -> Position {
    sibling_starts
        .iter()
        .copied()
        .filter(|candidate| *candidate > start)
        .min()
        .unwrap_or_else(|| end_of_file(source))
}

/// Whether the text covered by `old_range` in `old_source` is byte-identical
/// to the text covered by `new_range` in `new_source` (§4.1).
pub fn ranges_match(
    old_source: &str,
    old_range: Location,
    new_source: &str,
    new_range: Location,
) -> bool {
    let old_starts = line_start_offsets(old_source);
    let new_starts = line_start_offsets(new_source);

    let (Some(old_start), Some(old_end)) = (
        byte_offset(old_source, &old_starts, old_range.start),
        byte_offset(old_source, &old_starts, old_range.end),
    ) else {
        return false;
    };
    let (Some(new_start), Some(new_end)) = (
        byte_offset(new_source, &new_starts, new_range.start),
        byte_offset(new_source, &new_starts, new_range.end),
    ) else {
        return false;
    };

    if old_start > old_end || new_start > new_end {
        return false;
    }

    match (old_source.get(old_start..old_end), new_source.get(new_start..new_end)) {
        (Some(old_body), Some(new_body)) => old_body == new_body,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(sl: u32, sc: u32, el: u32, ec: u32) -> Location {
        Location {
            start: Position::new(sl, sc),
            end: Position::new(el, ec),
        }
    }

    #[test]
    fn identical_source_matches_itself() {
        let source = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
        let range = loc(2, 6, 2, 7);
        assert!(ranges_match(source, range, source, range));
    }

    #[test]
    fn insertion_above_the_range_preserves_the_match() {
        let old_source = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
        let new_source = "// a helpful comment\nfn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";

        let old_range = loc(2, 6, 2, 7);
        let new_range = loc(3, 6, 3, 7);
        assert!(ranges_match(old_source, old_range, new_source, new_range));
    }

    #[test]
    fn changed_body_breaks_the_match() {
        let old_source = "fn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
        let new_source = "fn add(a: i32, b: i32) -> i32 {\n    a - b\n}\n";

        let range = loc(2, 6, 2, 7);
        assert!(!ranges_match(old_source, range, new_source, range));
    }

    #[test]
    fn line_beyond_source_does_not_match() {
        let old_source = "a\n";
        let new_source = "a\n";
        let out_of_range = loc(5, 0, 5, 1);
        assert!(!ranges_match(old_source, out_of_range, new_source, out_of_range));
    }

    #[test]
    fn close_open_range_picks_next_distinct_start() {
        let source = "one\ntwo\nthree\n";
        let start = Position::new(1, 0);
        let siblings = [Position::new(1, 0), Position::new(1, 0), Position::new(2, 0)];
        assert_eq!(close_open_range(start, &siblings, source), Position::new(2, 0));
    }

    #[test]
    fn close_open_range_falls_back_to_eof() {
        let source = "one\ntwo\n";
        let start = Position::new(2, 0);
        assert_eq!(close_open_range(start, &[], source), end_of_file(source));
    }

    #[test]
    fn end_of_file_accounts_for_trailing_newline() {
        assert_eq!(end_of_file("abc\n"), Position::new(2, 0));
        assert_eq!(end_of_file("abc"), Position::new(1, 3));
    }
}
