use alloc::vec::Vec;

use crate::CardRect;

/// Scroll-axis geometry of the rendered card sequence.
///
/// Cards are appended as batches render and the whole layout is cleared on
/// a full replace. Start offsets are running prefix sums of size + gap; the
/// running end offset doubles as the pagination sentinel position, since
/// the sentinel sits directly after the last rendered card.
#[derive(Clone, Debug, Default)]
pub struct GridLayout {
    starts: Vec<u64>,
    sizes: Vec<u32>,
    gap: u32,
    end: u64,
}

impl GridLayout {
    pub fn new(gap: u32) -> Self {
        Self {
            starts: Vec::new(),
            sizes: Vec::new(),
            gap,
            end: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    /// Appends one card of `size` to the end of the grid and returns its
    /// rect.
    pub fn push_card(&mut self, size: u32) -> CardRect {
        let start = if self.sizes.is_empty() {
            0
        } else {
            self.end.saturating_add(self.gap as u64)
        };
        self.starts.push(start);
        self.sizes.push(size);
        self.end = start.saturating_add(size as u64);
        CardRect { start, size }
    }

    pub fn card(&self, index: usize) -> Option<CardRect> {
        let start = *self.starts.get(index)?;
        let size = *self.sizes.get(index)?;
        Some(CardRect { start, size })
    }

    /// Total extent of the rendered content (no trailing gap). The
    /// pagination sentinel sits here.
    pub fn total_size(&self) -> u64 {
        self.end
    }

    /// Discards all cards; used on a full replace or working-order reset.
    pub fn clear(&mut self) {
        self.starts.clear();
        self.sizes.clear();
        self.end = 0;
    }

    pub fn for_each_card(&self, mut f: impl FnMut(usize, CardRect)) {
        for index in 0..self.sizes.len() {
            f(
                index,
                CardRect {
                    start: self.starts[index],
                    size: self.sizes[index],
                },
            );
        }
    }
}
