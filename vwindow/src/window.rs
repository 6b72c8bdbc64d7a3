use crate::options::Invalidation;
use crate::range::{uniform_last_index, visible_count};
use crate::state::sanitize;
use crate::{
    Align, Calculated, FrameState, OptionPatch, PositionCache, RangeFinder, SizeResolver,
    WindowOptions, WindowRange,
};

/// A headless windowing engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects.
/// - The host drives it by providing viewport size, scroll offset, and measured item sizes.
/// - [`Window::calculate`] turns the current state into a [`Calculated`] snapshot.
///
/// Every mutation documents what it invalidates: viewport and scroll changes invalidate
/// nothing, a size change truncates the position cache after the measured index, and option
/// changes or [`Window::reset_sizes`] drop the whole cache.
///
/// The same type runs on the host thread and, in offload mode, inside the worker.
#[derive(Clone, Debug)]
pub struct Window {
    options: WindowOptions,
    viewport_size: f64,
    scroll_offset: f64,

    sizes: SizeResolver,
    positions: PositionCache,

    last: Calculated,
}

impl Window {
    pub fn new(options: WindowOptions) -> Self {
        Self::with_frame(options, FrameState::default())
    }

    /// Creates a window with initial viewport + scroll geometry (the worker `init` message).
    pub fn with_frame(options: WindowOptions, frame: FrameState) -> Self {
        vdebug!(
            item_count = options.item_count,
            item_size = options.item_size,
            overscan = options.overscan,
            dynamic = options.dynamic,
            "Window::new"
        );
        let frame = FrameState::new(frame.viewport_size, frame.scroll_offset);
        Self {
            sizes: SizeResolver::new(options.item_size),
            positions: PositionCache::new(),
            options,
            viewport_size: frame.viewport_size,
            scroll_offset: frame.scroll_offset,
            last: Calculated::default(),
        }
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn item_count(&self) -> usize {
        self.options.item_count
    }

    pub fn is_dynamic(&self) -> bool {
        self.options.dynamic
    }

    /// Applies a partial options update.
    ///
    /// Count, size and overscan changes drop the position cache. Direction and sizing-mode
    /// changes also drop measured sizes, since they were taken along another axis or mode.
    pub fn apply_patch(&mut self, patch: &OptionPatch) -> Invalidation {
        let invalidation = self.options.apply(patch);
        vtrace!(?patch, ?invalidation, "Window::apply_patch");
        match invalidation {
            Invalidation::None => {}
            Invalidation::Positions => {
                self.sizes.set_estimate(self.options.item_size);
                self.positions.reset();
            }
            Invalidation::All => {
                self.sizes.set_estimate(self.options.item_size);
                self.sizes.clear();
                self.positions.reset();
            }
        }
        invalidation
    }

    /// Clones the current options, applies `f`, then applies the difference.
    pub fn update_options(&mut self, f: impl FnOnce(&mut WindowOptions)) -> Invalidation {
        let mut next = self.options;
        f(&mut next);
        let patch = OptionPatch {
            direction: Some(next.direction),
            item_count: Some(next.item_count),
            item_size: Some(next.item_size),
            overscan: Some(next.overscan),
            dynamic: Some(next.dynamic),
        };
        self.apply_patch(&patch)
    }

    pub fn set_item_count(&mut self, item_count: usize) -> Invalidation {
        self.apply_patch(&OptionPatch::default().item_count(item_count))
    }

    pub fn set_item_size(&mut self, item_size: f64) -> Invalidation {
        self.apply_patch(&OptionPatch::default().item_size(item_size))
    }

    pub fn set_overscan(&mut self, overscan: usize) -> Invalidation {
        self.apply_patch(&OptionPatch::default().overscan(overscan))
    }

    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    pub fn set_viewport_size(&mut self, size: f64) {
        self.viewport_size = sanitize(size);
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.scroll_offset = sanitize(offset);
    }

    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport_size: self.viewport_size,
            scroll_offset: self.scroll_offset,
        }
    }

    pub fn restore_frame_state(&mut self, frame: FrameState) {
        self.set_viewport_size(frame.viewport_size);
        self.set_scroll_offset(frame.scroll_offset);
    }

    /// Records a measured size for `index`.
    ///
    /// Ignored in uniform mode, for indexes outside the list, and for non-finite or
    /// non-positive sizes. When the resolved size changes, the position cache is truncated
    /// before this returns. Returns `true` if anything changed.
    pub fn update_size(&mut self, index: usize, size: f64) -> bool {
        if !self.options.dynamic || index >= self.options.item_count {
            return false;
        }
        if !self.sizes.set_size(index, size) {
            return false;
        }
        vtrace!(index, size, "Window::update_size");
        self.positions.invalidate_from(index);
        true
    }

    /// Applies a batch of measurements; returns how many changed a resolved size.
    pub fn update_sizes(&mut self, entries: impl IntoIterator<Item = (usize, f64)>) -> usize {
        let mut changed = 0usize;
        for (index, size) in entries {
            if self.update_size(index, size) {
                changed += 1;
            }
        }
        changed
    }

    /// Drops every measured size and the whole position cache.
    pub fn reset_sizes(&mut self) {
        vdebug!(measured = self.sizes.override_count(), "Window::reset_sizes");
        self.sizes.clear();
        self.positions.reset();
    }

    pub fn sizes(&self) -> &SizeResolver {
        &self.sizes
    }

    pub fn positions(&self) -> &PositionCache {
        &self.positions
    }

    pub fn size_of(&self, index: usize) -> f64 {
        self.sizes.size_of(index)
    }

    /// Offset of `index` from the list origin.
    pub fn offset_of(&mut self, index: usize) -> f64 {
        self.finder().offset_of(index)
    }

    pub fn locate(&mut self, scroll_offset: f64) -> usize {
        self.finder().locate(scroll_offset)
    }

    pub fn total_size(&mut self) -> f64 {
        let count = self.options.item_count;
        if !self.options.dynamic {
            return count as f64 * self.options.item_size;
        }
        if count == 0 {
            return 0.0;
        }
        let last = count - 1;
        self.offset_of(last) + self.sizes.size_of(last)
    }

    pub fn max_scroll_offset(&mut self) -> f64 {
        (self.total_size() - self.viewport_size).max(0.0)
    }

    pub fn clamp_scroll_offset(&mut self, offset: f64) -> f64 {
        let max = self.max_scroll_offset();
        sanitize(offset).min(max)
    }

    /// Computes the clamped scroll offset that brings `index` into view with `align`.
    pub fn scroll_to_index_offset(&mut self, index: usize, align: Align) -> f64 {
        let count = self.options.item_count;
        if count == 0 {
            return 0.0;
        }
        let index = index.min(count - 1);
        let target = self.offset_of(index);
        let size = self.sizes.size_of(index);
        let view = self.viewport_size;

        let target = if view > 0.0 {
            match align {
                Align::Start => target,
                Align::Center => target - view / 2.0 + size / 2.0,
                Align::End => target - view + size,
            }
        } else {
            target
        };

        let max = self.total_size() - view;
        target.min(max).max(0.0)
    }

    /// The snapshot produced by the most recent [`Window::calculate`].
    pub fn last(&self) -> Calculated {
        self.last
    }

    /// Recomputes the overscanned range, its offset, total size, and boundary flags.
    pub fn calculate(&mut self) -> Calculated {
        let count = self.options.item_count;
        let overscan = self.options.overscan;
        let viewport = self.viewport_size;
        let scroll = self.scroll_offset;

        let (start, last) = if self.options.dynamic {
            let overscan_size = overscan as f64 * self.sizes.estimate();
            let mut finder = self.finder();
            let start = finder.locate(scroll);
            (start, finder.expand(start, viewport, overscan_size))
        } else {
            let start = self.finder().locate(scroll);
            let visible = visible_count(viewport, self.options.item_size);
            (start, uniform_last_index(start, visible, overscan, count))
        };

        let first = start.saturating_sub(overscan);
        let range = match last {
            Some(last) => WindowRange::inclusive(first, last),
            None => WindowRange::empty_at(first),
        };

        let offset = self.offset_of(range.start);
        let total_size = self.total_size();
        let at_start = scroll <= 0.0;
        let at_end = viewport > 0.0 && scroll + viewport >= total_size - 1.0;

        let calc = Calculated {
            range,
            offset,
            total_size,
            at_start,
            at_end,
        };
        vtrace!(
            start = range.start,
            end = range.end,
            offset,
            total_size,
            "Window::calculate"
        );
        self.last = calc;
        calc
    }

    fn finder(&mut self) -> RangeFinder<'_> {
        RangeFinder::new(
            &self.sizes,
            &mut self.positions,
            self.options.item_count,
            self.options.dynamic,
        )
    }
}
