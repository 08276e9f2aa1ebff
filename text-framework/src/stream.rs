use combinator_framework::Stream;
use common_framework::TextSlice;
use std::sync::Arc;

/// A persistent stream of characters over a shared source buffer.
///
/// The position is a byte offset into the source, so it can be handed
/// directly to a [`LineOffsetTable`](common_framework::LineOffsetTable).
#[derive(Debug, Clone)]
pub struct CharStream<D = ()> {
    buffer: Arc<str>,
    offset: usize,
    data: D,
}

impl CharStream<()> {
    /// Creates a stream without a data payload.
    pub fn from_source(source: impl Into<Arc<str>>) -> Self {
        Self::new(source, ())
    }
}

impl<D> CharStream<D> {
    /// Creates a stream at the start of `source` carrying `data`.
    pub fn new(source: impl Into<Arc<str>>, data: D) -> Self {
        Self {
            buffer: source.into(),
            offset: 0,
            data,
        }
    }

    /// Returns the current offset in bytes.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the input not yet consumed.
    pub fn remaining(&self) -> TextSlice {
        TextSlice::new(Arc::clone(&self.buffer), self.offset, self.buffer.len())
    }

    /// Returns the whole source text.
    pub fn source(&self) -> &Arc<str> {
        &self.buffer
    }

    /// Returns the source between this stream and a later one.
    pub fn slice_to(&self, later: &Self) -> TextSlice {
        let end = later.offset.max(self.offset);
        TextSlice::new(Arc::clone(&self.buffer), self.offset, end)
    }
}

impl<D: Clone> Stream for CharStream<D> {
    type Item = char;
    type Data = D;

    fn advance(&self) -> Option<(char, Self)> {
        let ch = self.buffer[self.offset..].chars().next()?;
        let next = Self {
            buffer: Arc::clone(&self.buffer),
            offset: self.offset + ch.len_utf8(),
            data: self.data.clone(),
        };
        Some((ch, next))
    }

    fn position(&self) -> usize {
        self.offset
    }

    fn data(&self) -> &D {
        &self.data
    }

    fn with_data(&self, data: D) -> Self {
        Self {
            buffer: Arc::clone(&self.buffer),
            offset: self.offset,
            data,
        }
    }

    fn is_at_end(&self) -> bool {
        self.offset >= self.buffer.len()
    }
}
