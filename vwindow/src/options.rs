use crate::Direction;

/// Default overscan when none is configured.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Configuration for [`crate::Window`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WindowOptions {
    /// Scroll axis; selects which extent the host measures.
    pub direction: Direction,
    /// Uniform item size, or the estimate for unmeasured items in dynamic mode.
    #[cfg_attr(feature = "serde", serde(rename = "estimatedSize"))]
    pub item_size: f64,
    pub item_count: usize,
    /// Extra items beyond each visible edge.
    pub overscan: usize,
    /// Enables per-item measurement and the position cache.
    pub dynamic: bool,
}

impl WindowOptions {
    /// Creates options for a uniform vertical list.
    pub fn new(item_count: usize, item_size: f64) -> Self {
        Self {
            direction: Direction::Vertical,
            item_size,
            item_count,
            overscan: DEFAULT_OVERSCAN,
            dynamic: false,
        }
    }

    /// Creates options for a dynamically measured vertical list.
    ///
    /// `estimated_size` is used for every item until the host measures it.
    pub fn dynamic(item_count: usize, estimated_size: f64) -> Self {
        Self::new(item_count, estimated_size).with_dynamic(true)
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_item_size(mut self, item_size: f64) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = dynamic;
        self
    }

    /// Applies a partial update and reports what it invalidates.
    pub fn apply(&mut self, patch: &OptionPatch) -> Invalidation {
        let mut out = Invalidation::None;

        if let Some(direction) = patch.direction {
            if direction != self.direction {
                self.direction = direction;
                out = out.max(Invalidation::All);
            }
        }
        if let Some(dynamic) = patch.dynamic {
            if dynamic != self.dynamic {
                self.dynamic = dynamic;
                out = out.max(Invalidation::All);
            }
        }
        if let Some(item_count) = patch.item_count {
            if item_count != self.item_count {
                self.item_count = item_count;
                out = out.max(Invalidation::Positions);
            }
        }
        if let Some(item_size) = patch.item_size {
            if item_size != self.item_size {
                self.item_size = item_size;
                out = out.max(Invalidation::Positions);
            }
        }
        if let Some(overscan) = patch.overscan {
            if overscan != self.overscan {
                self.overscan = overscan;
                out = out.max(Invalidation::Positions);
            }
        }

        out
    }
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}

/// A partial options update (the worker `option` message payload).
///
/// Fields left as `None` keep their current value.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct OptionPatch {
    pub direction: Option<Direction>,
    pub item_count: Option<usize>,
    #[cfg_attr(feature = "serde", serde(rename = "estimatedSize"))]
    pub item_size: Option<f64>,
    pub overscan: Option<usize>,
    pub dynamic: Option<bool>,
}

impl OptionPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn item_count(mut self, item_count: usize) -> Self {
        self.item_count = Some(item_count);
        self
    }

    pub fn item_size(mut self, item_size: f64) -> Self {
        self.item_size = Some(item_size);
        self
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = Some(overscan);
        self
    }

    pub fn dynamic(mut self, dynamic: bool) -> Self {
        self.dynamic = Some(dynamic);
        self
    }
}

/// What a state change invalidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Invalidation {
    /// Nothing cached depends on the change (viewport, scroll).
    None,
    /// The whole position cache is dropped; measured sizes survive.
    Positions,
    /// Position cache and measured sizes are both dropped (sizing mode or axis changed).
    All,
}
