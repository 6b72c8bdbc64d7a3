/// Scroll axis of the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Direction {
    /// Items stack along the block axis; sizes are heights.
    #[default]
    Vertical,
    /// Items stack along the inline axis; sizes are widths.
    Horizontal,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }
}

/// Where a `scroll_to_index` target lands inside the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// The index window eligible for rendering.
///
/// `end` is exclusive. An inclusive `{start, end}` pair maps to `start..end + 1`, and the
/// "nothing measured yet" sentinel (`end = start - 1`) is a range with `start == end`.
///
/// With `feature = "serde"` it is serialized in that inclusive form, e.g. `{"start": 0, "end": 7}`
/// for `0..8` and `{"start": 0, "end": -1}` for an empty range at 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(into = "InclusiveRange", from = "InclusiveRange")
)]
pub struct WindowRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl WindowRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    /// Builds a range from an inclusive `[first, last]` pair.
    pub fn inclusive(first: usize, last: usize) -> Self {
        Self {
            start: first,
            end: last.saturating_add(1).max(first),
        }
    }

    /// An empty range anchored at `start`.
    pub fn empty_at(start: usize) -> Self {
        Self { start, end: start }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// The inclusive last index, if any.
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn indices(&self) -> core::ops::Range<usize> {
        self.start..self.end.max(self.start)
    }
}

/// Wire form of [`WindowRange`]: inclusive bounds, `end < start` when empty.
#[cfg(feature = "serde")]
#[derive(Clone, Copy, serde::Serialize, serde::Deserialize)]
struct InclusiveRange {
    start: usize,
    end: i64,
}

#[cfg(feature = "serde")]
impl From<WindowRange> for InclusiveRange {
    fn from(range: WindowRange) -> Self {
        let start = range.start;
        let end = match range.last() {
            Some(last) => i64::try_from(last).unwrap_or(i64::MAX),
            None => i64::try_from(start).unwrap_or(i64::MAX) - 1,
        };
        Self { start, end }
    }
}

#[cfg(feature = "serde")]
impl From<InclusiveRange> for WindowRange {
    fn from(wire: InclusiveRange) -> Self {
        match usize::try_from(wire.end) {
            Ok(last) if last >= wire.start => WindowRange::inclusive(wire.start, last),
            _ => WindowRange::empty_at(wire.start),
        }
    }
}

/// The result of one range computation.
///
/// This is what the host renders from, and what the worker sends back in offload mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Calculated {
    /// Overscanned index window.
    pub range: WindowRange,
    /// Offset of `range.start` from the list origin.
    pub offset: f64,
    /// Full scrollable extent.
    pub total_size: f64,
    pub at_start: bool,
    pub at_end: bool,
}
