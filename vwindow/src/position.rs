use alloc::vec::Vec;

use crate::SizeResolver;

/// Memoized prefix offsets: `offset(i)` is the sum of the sizes of items `0..i`.
///
/// The table only ever holds a valid prefix. It grows lazily as later indexes are queried and
/// is truncated from a mutated index onward, so out-of-order measurements only cost the suffix
/// after the item that changed.
#[derive(Clone, Debug, Default)]
pub struct PositionCache {
    offsets: Vec<f64>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leading indexes whose offsets are cached.
    pub fn valid_len(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the offset of `index`, extending the table up to `index` if needed.
    ///
    /// Extending by `k` entries costs `O(k)`; cached lookups are `O(1)`.
    pub fn offset_of(&mut self, index: usize, sizes: &SizeResolver) -> f64 {
        if index == 0 {
            return 0.0;
        }
        if let Some(&offset) = self.offsets.get(index) {
            return offset;
        }

        if self.offsets.is_empty() {
            self.offsets.push(0.0);
        }
        self.offsets.reserve(index + 1 - self.offsets.len());

        let mut i = self.offsets.len() - 1;
        let mut offset = self.offsets[i];
        while i < index {
            offset += sizes.size_of(i);
            i += 1;
            self.offsets.push(offset);
        }
        offset
    }

    /// Keeps only the offsets of indexes `0..=index`.
    ///
    /// Must run before any read that should observe a size change at `index`; `offset(index)`
    /// itself only depends on earlier items and stays valid.
    pub fn invalidate_from(&mut self, index: usize) {
        let keep = index.saturating_add(1);
        if keep < self.offsets.len() {
            self.offsets.truncate(keep);
        }
    }

    pub fn reset(&mut self) {
        self.offsets.clear();
    }
}
