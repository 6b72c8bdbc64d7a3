use crate::size_map::SizeMap;

/// Resolves an item's size: a measured override if present, else the estimate.
///
/// In uniform mode no overrides are ever recorded and every item resolves to the estimate.
#[derive(Clone, Debug, Default)]
pub struct SizeResolver {
    estimate: f64,
    overrides: SizeMap,
}

impl SizeResolver {
    pub fn new(estimate: f64) -> Self {
        Self {
            estimate,
            overrides: SizeMap::new(),
        }
    }

    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Replaces the estimate. Callers are responsible for resetting any offsets derived from it.
    pub fn set_estimate(&mut self, estimate: f64) {
        self.estimate = estimate;
    }

    /// Returns the measured size of `index`, or the estimate when unmeasured.
    ///
    /// Indexes outside the list are the caller's responsibility; they resolve to the estimate.
    pub fn size_of(&self, index: usize) -> f64 {
        match self.overrides.get(&index) {
            Some(&size) if size > 0.0 => size,
            _ => self.estimate,
        }
    }

    /// Records a measured size.
    ///
    /// Returns `true` only when the resolved size of `index` actually changed. Non-finite and
    /// non-positive sizes are treated as "no measurement" and ignored.
    pub fn set_size(&mut self, index: usize, size: f64) -> bool {
        if !size.is_finite() || size <= 0.0 {
            return false;
        }
        if self.size_of(index) == size {
            return false;
        }
        self.overrides.insert(index, size);
        true
    }

    pub fn is_measured(&self, index: usize) -> bool {
        self.overrides.contains_key(&index)
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Iterates over the recorded overrides (index → size) without allocations.
    ///
    /// Iteration order is unspecified with `feature = "std"`.
    pub fn for_each_override(&self, mut f: impl FnMut(usize, f64)) {
        for (&index, &size) in self.overrides.iter() {
            f(index, size);
        }
    }

    /// Drops every override.
    pub fn clear(&mut self) {
        self.overrides.clear();
    }
}
