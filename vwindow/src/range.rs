use crate::{PositionCache, SizeResolver};

/// Maps scroll offsets to item indexes.
///
/// A `RangeFinder` borrows the size state for the duration of one computation. Queries are
/// read-only with respect to sizes but may extend the position cache as a side effect.
#[derive(Debug)]
pub struct RangeFinder<'a> {
    sizes: &'a SizeResolver,
    positions: &'a mut PositionCache,
    count: usize,
    dynamic: bool,
}

impl<'a> RangeFinder<'a> {
    pub fn new(
        sizes: &'a SizeResolver,
        positions: &'a mut PositionCache,
        count: usize,
        dynamic: bool,
    ) -> Self {
        Self {
            sizes,
            positions,
            count,
            dynamic,
        }
    }

    /// Returns the index of the item at `scroll_offset`, clamped to `[0, count - 1]`.
    ///
    /// Returns `0` for an empty list.
    pub fn locate(&mut self, scroll_offset: f64) -> usize {
        let last = self.count.saturating_sub(1);
        if self.dynamic {
            let raw = self.search(scroll_offset);
            raw.clamp(0, last as isize) as usize
        } else {
            self.uniform_start(scroll_offset).min(last)
        }
    }

    /// `floor(scroll_offset / max(1, item_size))`, unclamped.
    pub fn uniform_start(&self, scroll_offset: f64) -> usize {
        let size = self.sizes.estimate().max(1.0);
        let q = scroll_offset / size;
        if q.is_finite() && q > 0.0 { q as usize } else { 0 }
    }

    /// Binary search over the measured intervals `[offset, offset + size)`.
    ///
    /// On exhaustion this returns `min(left, right)`, which is `-1` for an empty list and
    /// `count - 1` past the last item. [`Self::locate`] clamps the result.
    pub fn search(&mut self, scroll_offset: f64) -> isize {
        if scroll_offset <= 0.0 {
            return 0;
        }

        let mut left: isize = 0;
        let mut right: isize = self.count as isize - 1;
        while left <= right {
            let mid = left + (right - left) / 2;
            let offset = self.positions.offset_of(mid as usize, self.sizes);
            let size = self.sizes.size_of(mid as usize);

            if scroll_offset >= offset && scroll_offset < offset + size {
                return mid;
            } else if scroll_offset < offset {
                right = mid - 1;
            } else {
                left = mid + 1;
            }
        }

        left.min(right)
    }

    /// Grows the window from `start` until `viewport_size + overscan_size` is covered.
    ///
    /// Returns the last included index, clamped to `count - 1` and never below `start`, or
    /// `None` for an empty list.
    pub fn expand(&mut self, start: usize, viewport_size: f64, overscan_size: f64) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let budget = viewport_size + overscan_size;

        let mut acc = 0.0;
        let mut end = start;
        while end < self.count && acc < budget {
            acc += self.sizes.size_of(end);
            end += 1;
        }

        let last = end.saturating_sub(1).min(self.count - 1);
        Some(last.max(start))
    }

    pub fn offset_of(&mut self, index: usize) -> f64 {
        if self.dynamic {
            self.positions.offset_of(index, self.sizes)
        } else {
            index as f64 * self.sizes.estimate()
        }
    }
}

/// Number of uniform items needed to cover `viewport_size` (`ceil(viewport / item_size)`).
///
/// Returns `0` when either input is not positive.
pub fn visible_count(viewport_size: f64, item_size: f64) -> usize {
    if item_size <= 0.0 || viewport_size <= 0.0 {
        return 0;
    }
    let q = viewport_size / item_size;
    if !q.is_finite() {
        return usize::MAX;
    }
    let whole = q as usize;
    if (whole as f64) < q { whole + 1 } else { whole }
}

/// Last index of a uniform window: `min(count - 1, start + visible + overscan - 1)`.
///
/// Returns `None` when that value would fall below `start` (nothing to cover yet) or the list
/// is empty.
pub fn uniform_last_index(
    start: usize,
    visible: usize,
    overscan: usize,
    count: usize,
) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let span = visible.saturating_add(overscan);
    if span == 0 {
        return None;
    }
    let last = start.saturating_add(span - 1).min(count - 1);
    (last >= start).then_some(last)
}
