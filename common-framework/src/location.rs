use std::fmt;

/// A source location resolved from a byte offset.
///
/// `line` and `column` are 0-based, as produced by the line offset table.
/// Presentation (1-based numbering, formatting) is up to the caller; see
/// [`Location::one_based`] and the `Display` impl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    /// Line index (0-based)
    pub line: usize,
    /// Column in bytes from the start of the line (0-based)
    pub column: usize,
    /// Byte offset from the start of the input
    pub offset: usize,
}

impl Location {
    /// Creates a location at the start of the input.
    pub fn new() -> Self {
        Self {
            line: 0,
            column: 0,
            offset: 0,
        }
    }

    /// Creates a location with the given values.
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Returns `(line, column)` numbered from 1, for messages.
    pub fn one_based(&self) -> (usize, usize) {
        (self.line + 1, self.column + 1)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (line, column) = self.one_based();
        write!(f, "{}:{}", line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_new() {
        let loc = Location::new();
        assert_eq!(loc.line, 0);
        assert_eq!(loc.column, 0);
        assert_eq!(loc.offset, 0);
    }

    #[test]
    fn test_location_at() {
        let loc = Location::at(5, 10, 100);
        assert_eq!(loc.line, 5);
        assert_eq!(loc.column, 10);
        assert_eq!(loc.offset, 100);
    }

    #[test]
    fn test_location_default() {
        assert_eq!(Location::default(), Location::new());
    }

    #[test]
    fn test_location_display_is_one_based() {
        let loc = Location::at(11, 4, 200);
        assert_eq!(loc.one_based(), (12, 5));
        assert_eq!(loc.to_string(), "12:5");
    }
}
