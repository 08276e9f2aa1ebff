//! Offset → (line, column) conversion for error reporting.
//!
//! The table is built once per source text and is read-only afterwards.
//! Lookups are 0-based and binary-searched: an offset resolves to the line
//! with the greatest start offset that is `<=` the queried offset.

use crate::location::Location;
use crate::text_slice::TextSlice;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// The offset lies past the end of the source the table was built from.
    #[error("offset {offset} is outside the source (length {length})")]
    InvalidPosition { offset: usize, length: usize },
}

/// Sorted `(line start offset, line text)` pairs covering a whole source.
///
/// Invariants: start offsets are strictly increasing, the first line starts at
/// 0, and a source ending in `'\n'` gets a trailing empty line so that the
/// end-of-input offset is addressable.
#[derive(Debug, Clone)]
pub struct LineOffsetTable {
    lines: Vec<(usize, TextSlice)>,
    length: usize,
}

impl LineOffsetTable {
    pub fn new(source: impl Into<Arc<str>>) -> Self {
        let buffer: Arc<str> = source.into();
        let mut lines = Vec::new();
        let mut start = 0;

        for (index, byte) in buffer.bytes().enumerate() {
            if byte == b'\n' {
                lines.push((start, TextSlice::new(Arc::clone(&buffer), start, index)));
                start = index + 1;
            }
        }
        lines.push((start, TextSlice::new(Arc::clone(&buffer), start, buffer.len())));

        Self {
            lines,
            length: buffer.len(),
        }
    }

    /// Number of lines, including a trailing empty line.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length in bytes of the source the table was built from.
    pub fn source_len(&self) -> usize {
        self.length
    }

    /// Start offset of `line` (0-based).
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.lines.get(line).map(|(start, _)| *start)
    }

    /// Text of `line` (0-based), without its terminating newline.
    pub fn line_text(&self, line: usize) -> Option<&TextSlice> {
        self.lines.get(line).map(|(_, text)| text)
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, &TextSlice)> {
        self.lines.iter().map(|(start, text)| (*start, text))
    }

    /// Resolves a byte offset to a 0-based location.
    pub fn locate(&self, offset: usize) -> Result<Location, LocationError> {
        if offset > self.length {
            return Err(LocationError::InvalidPosition {
                offset,
                length: self.length,
            });
        }

        // The first line starts at 0, so an insertion point is always >= 1.
        let line = match self.lines.binary_search_by(|(start, _)| start.cmp(&offset)) {
            Ok(line) => line,
            Err(insertion) => insertion - 1,
        };
        let column = offset - self.lines[line].0;

        Ok(Location::at(line, column, offset))
    }
}

/// Builds the line offset table for `source`.
pub fn line_offset_table(source: impl Into<Arc<str>>) -> LineOffsetTable {
    LineOffsetTable::new(source)
}

/// Returns the 0-based `(line, column)` of `offset`.
pub fn offset_to_line_col(
    table: &LineOffsetTable,
    offset: usize,
) -> Result<(usize, usize), LocationError> {
    table.locate(offset).map(|loc| (loc.line, loc.column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, (0, 0))]
    #[case(1, (0, 1))]
    #[case(2, (0, 2))]
    #[case(3, (1, 0))]
    #[case(5, (1, 2))]
    #[case(6, (2, 0))]
    fn test_offsets_in_two_line_source(#[case] offset: usize, #[case] expected: (usize, usize)) {
        let table = line_offset_table("ab\ncd\n");
        assert_eq!(offset_to_line_col(&table, offset), Ok(expected));
    }

    #[test]
    fn test_table_has_trailing_empty_line() {
        let table = LineOffsetTable::new("ab\ncd\n");
        assert_eq!(table.line_count(), 3);
        assert_eq!(table.line_start(2), Some(6));
        assert_eq!(table.line_text(2).map(|t| t.as_str()), Some(""));
        assert_eq!(table.line_text(1).map(|t| t.as_str()), Some("cd"));
    }

    #[test]
    fn test_starts_strictly_increasing() {
        let table = LineOffsetTable::new("\n\nx\n\ny");
        let starts: Vec<usize> = table.entries().map(|(start, _)| start).collect();
        assert_eq!(starts, vec![0, 1, 2, 4, 5]);
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_source() {
        let table = LineOffsetTable::new("");
        assert_eq!(table.line_count(), 1);
        assert_eq!(table.locate(0), Ok(Location::at(0, 0, 0)));
    }

    #[test]
    fn test_offset_past_end_is_invalid() {
        let table = LineOffsetTable::new("abc");
        assert_eq!(table.source_len(), 3);
        assert_eq!(table.locate(3), Ok(Location::at(0, 3, 3)));
        assert_eq!(
            table.locate(4),
            Err(LocationError::InvalidPosition {
                offset: 4,
                length: 3
            })
        );
    }
}
