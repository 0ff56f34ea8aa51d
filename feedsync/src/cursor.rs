/// Stateful generator of successive fixed-size batches from an ordered
/// source.
///
/// The cursor only tracks an offset; the source slice is supplied per call,
/// so rebinding the working order is implicit. An empty batch means the
/// offset has reached the source length; that is the exhausted terminal
/// state, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationCursor {
    offset: usize,
    batch_size: usize,
}

impl PaginationCursor {
    /// Creates a cursor at offset zero. `batch_size` is clamped to at
    /// least 1.
    pub fn new(batch_size: usize) -> Self {
        Self {
            offset: 0,
            batch_size: batch_size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Changes the batch size for subsequent calls. Clamped to at least 1.
    pub fn set_batch_size(&mut self, batch_size: usize) {
        self.batch_size = batch_size.max(1);
    }

    /// Returns the next contiguous batch of `source` and advances the
    /// offset by the returned length.
    pub fn next_batch<'a, T>(&mut self, source: &'a [T]) -> &'a [T] {
        let start = self.offset.min(source.len());
        let end = start.saturating_add(self.batch_size).min(source.len());
        let batch = &source[start..end];
        self.offset = end;
        ftrace!(start, len = batch.len(), "PaginationCursor::next_batch");
        batch
    }

    /// True once the offset has consumed a source of `source_len` items.
    pub fn is_exhausted(&self, source_len: usize) -> bool {
        self.offset >= source_len
    }

    pub fn remaining(&self, source_len: usize) -> usize {
        source_len.saturating_sub(self.offset)
    }

    /// Zeroes the offset. Callers re-supply the (possibly rebound) source on
    /// the next call; resetting renders nothing by itself.
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}
