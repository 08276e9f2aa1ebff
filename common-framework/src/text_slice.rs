use std::ops::{Deref, Range};
use std::sync::Arc;

/// Immutable slice of a shared source buffer.
///
/// Holds an `Arc<str>` so slices can be cloned and stored (in line tables,
/// tokens, streams) without borrowing the original input.
#[derive(Clone, Debug)]
pub struct TextSlice {
    buffer: Arc<str>,
    start: usize,
    end: usize,
}

impl TextSlice {
    /// Creates a slice of `buffer[start..end]`.
    pub fn new(buffer: Arc<str>, start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        debug_assert!(end <= buffer.len());
        Self { buffer, start, end }
    }

    /// Creates a slice covering the entire buffer.
    pub fn whole(buffer: Arc<str>) -> Self {
        let end = buffer.len();
        Self {
            buffer,
            start: 0,
            end,
        }
    }

    /// Returns the length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Byte range of this slice within the shared buffer.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn as_str(&self) -> &str {
        &self.buffer[self.start..self.end]
    }
}

impl std::fmt::Display for TextSlice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Deref for TextSlice {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for TextSlice {
    fn as_ref(&self) -> &str {
        self
    }
}

impl PartialEq<&str> for TextSlice {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<TextSlice> for &str {
    fn eq(&self, other: &TextSlice) -> bool {
        *self == other.as_str()
    }
}

// Content equality: two slices of different buffers with the same text compare equal.
impl PartialEq for TextSlice {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for TextSlice {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_range() {
        let buffer: Arc<str> = Arc::from("hello world");
        let slice = TextSlice::new(buffer, 6, 11);
        assert_eq!(slice, "world");
        assert_eq!(slice.range(), 6..11);
        assert_eq!(slice.len(), 5);
    }

    #[test]
    fn test_slice_whole_and_empty() {
        let buffer: Arc<str> = Arc::from("abc");
        assert_eq!(TextSlice::whole(buffer.clone()), "abc");
        assert!(TextSlice::new(buffer, 3, 3).is_empty());
    }

    #[test]
    fn test_slice_equality_is_by_content() {
        let a = TextSlice::whole(Arc::from("same"));
        let b = TextSlice::new(Arc::from("a same thing"), 2, 6);
        assert_eq!(a, b);
    }
}
